use log::{info, warn};
use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};

const SAMPLE_RATE: u32 = 44_100;
// Gain each tone ramps down to by the end of its duration.
const ENVELOPE_FLOOR: f32 = 0.01;

const MUSIC_STEP_SECONDS: f32 = 0.15;
const MUSIC_NOTE_SECONDS: f32 = 0.1;
const MUSIC_VOLUME: f32 = 0.05;
// 16-step arpeggio, zeros are rests. Loops for as long as a game runs.
const MUSIC_NOTES: [f32; 16] = [
    220.0, 0.0, 261.0, 0.0, 329.0, 0.0, 261.0, 0.0, //
    196.0, 0.0, 246.0, 0.0, 293.0, 0.0, 246.0, 0.0,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A single oscillator burst within a cue, offset from the cue's start.
#[derive(Copy, Clone, Debug)]
struct Tone {
    delay: f32,
    frequency: f32,
    waveform: Waveform,
    duration: f32,
    volume: f32,
}

const EAT_TONES: &[Tone] = &[
    Tone { delay: 0.0, frequency: 600.0, waveform: Waveform::Sine, duration: 0.1, volume: 0.1 },
    Tone { delay: 0.05, frequency: 800.0, waveform: Waveform::Sine, duration: 0.1, volume: 0.1 },
];

const GAME_OVER_TONES: &[Tone] = &[
    Tone { delay: 0.0, frequency: 150.0, waveform: Waveform::Sawtooth, duration: 0.5, volume: 0.2 },
    Tone { delay: 0.2, frequency: 100.0, waveform: Waveform::Sawtooth, duration: 0.5, volume: 0.2 },
];

const MENU_MOVE_TONES: &[Tone] = &[
    Tone { delay: 0.0, frequency: 200.0, waveform: Waveform::Square, duration: 0.05, volume: 0.05 },
];

const MENU_SELECT_TONES: &[Tone] = &[
    Tone { delay: 0.0, frequency: 440.0, waveform: Waveform::Square, duration: 0.1, volume: 0.1 },
    Tone { delay: 0.05, frequency: 660.0, waveform: Waveform::Square, duration: 0.2, volume: 0.1 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Eat,
    GameOver,
    MenuMove,
    MenuSelect,
}

fn waveform_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 { 1.0 } else { -1.0 }
        }
        Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
}

/// Mixes the tones into a mono PCM16 WAV of the given length.
fn render_wav(tones: &[Tone], total_seconds: f32) -> Vec<u8> {
    let num_samples = (total_seconds * SAMPLE_RATE as f32) as usize;
    let mut samples = vec![0f32; num_samples];

    for tone in tones {
        let start = (tone.delay * SAMPLE_RATE as f32) as usize;
        let count = (tone.duration * SAMPLE_RATE as f32) as usize;
        for i in 0..count {
            let Some(slot) = samples.get_mut(start + i) else {
                break;
            };
            let t = i as f32 / SAMPLE_RATE as f32;
            let phase = (t * tone.frequency).fract();
            let envelope = if tone.volume <= ENVELOPE_FLOOR {
                tone.volume
            } else {
                tone.volume * (ENVELOPE_FLOOR / tone.volume).powf(t / tone.duration)
            };
            *slot += envelope * waveform_sample(tone.waveform, phase);
        }
    }

    encode_pcm16(&samples)
}

fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let chunk_size = 36 + data_size;
    let block_align: u16 = 2; // mono 16-bit
    let byte_rate = SAMPLE_RATE * block_align as u32;

    let mut data = Vec::with_capacity(44 + samples.len() * 2);
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        data.extend_from_slice(&value.to_le_bytes());
    }
    data
}

// Cues end when their last tone does.
fn cue_seconds(tones: &[Tone]) -> f32 {
    tones.iter().map(|t| t.delay + t.duration).fold(0.0, f32::max)
}

fn music_wav() -> Vec<u8> {
    let tones: Vec<Tone> = MUSIC_NOTES
        .iter()
        .enumerate()
        .filter(|(_, frequency)| **frequency > 0.0)
        .map(|(i, &frequency)| Tone {
            delay: i as f32 * MUSIC_STEP_SECONDS,
            frequency,
            waveform: Waveform::Square,
            duration: MUSIC_NOTE_SECONDS,
            volume: MUSIC_VOLUME,
        })
        .collect();
    // Render the full 16 steps so the loop point stays on the beat.
    render_wav(&tones, MUSIC_NOTES.len() as f32 * MUSIC_STEP_SECONDS)
}

struct CueSounds {
    eat: Sound,
    game_over: Sound,
    menu_move: Sound,
    menu_select: Sound,
    music: Sound,
}

/// All generated sounds plus the mute/volume gates. When loading fails
/// the bank stays empty and every call is a no-op.
pub struct AudioBank {
    sounds: Option<CueSounds>,
    volume: f32,
    muted: bool,
    music_on: bool,
    music_audible: bool,
}

impl AudioBank {
    pub async fn load(volume: f32, muted: bool) -> Self {
        let sounds = match load_sounds().await {
            Ok(sounds) => {
                info!("audio bank ready");
                Some(sounds)
            }
            Err(err) => {
                warn!("audio disabled: {err:?}");
                None
            }
        };
        AudioBank {
            sounds,
            volume: volume.clamp(0.0, 1.0),
            muted,
            music_on: false,
            music_audible: false,
        }
    }

    /// A bank with no sounds at all, for driving the app headless.
    #[cfg(test)]
    pub fn disabled() -> Self {
        AudioBank {
            sounds: None,
            volume: 0.0,
            muted: true,
            music_on: false,
            music_audible: false,
        }
    }

    /// Fire-and-forget playback of one cue.
    pub fn play(&self, cue: Cue) {
        let Some(sounds) = &self.sounds else { return };
        if self.muted {
            return;
        }
        let sound = match cue {
            Cue::Eat => &sounds.eat,
            Cue::GameOver => &sounds.game_over,
            Cue::MenuMove => &sounds.menu_move,
            Cue::MenuSelect => &sounds.menu_select,
        };
        audio::play_sound(sound, PlaySoundParams { looped: false, volume: self.volume });
    }

    /// Restarts the background loop from the first step.
    pub fn start_music(&mut self) {
        self.music_audible = true;
        let Some(sounds) = &self.sounds else { return };
        if self.music_on {
            audio::stop_sound(&sounds.music);
        }
        audio::play_sound(
            &sounds.music,
            PlaySoundParams { looped: true, volume: self.music_volume() },
        );
        self.music_on = true;
    }

    pub fn stop_music(&mut self) {
        self.music_audible = false;
        let Some(sounds) = &self.sounds else { return };
        if self.music_on {
            audio::stop_sound(&sounds.music);
            self.music_on = false;
        }
    }

    /// Silences or restores the loop without moving its position, so a
    /// paused game resumes mid-arpeggio.
    pub fn set_music_audible(&mut self, audible: bool) {
        self.music_audible = audible;
        self.apply_music_volume();
    }

    /// Returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.apply_music_volume();
        self.muted
    }

    fn apply_music_volume(&self) {
        let Some(sounds) = &self.sounds else { return };
        if self.music_on {
            audio::set_sound_volume(&sounds.music, self.music_volume());
        }
    }

    fn music_volume(&self) -> f32 {
        if self.muted || !self.music_audible { 0.0 } else { self.volume }
    }
}

async fn load_sounds() -> Result<CueSounds, macroquad::Error> {
    Ok(CueSounds {
        eat: load_sound_from_bytes(&render_wav(EAT_TONES, cue_seconds(EAT_TONES))).await?,
        game_over: load_sound_from_bytes(&render_wav(GAME_OVER_TONES, cue_seconds(GAME_OVER_TONES)))
            .await?,
        menu_move: load_sound_from_bytes(&render_wav(MENU_MOVE_TONES, cue_seconds(MENU_MOVE_TONES)))
            .await?,
        menu_select: load_sound_from_bytes(&render_wav(
            MENU_SELECT_TONES,
            cue_seconds(MENU_SELECT_TONES),
        ))
        .await?,
        music: load_sound_from_bytes(&music_wav()).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(wav: &[u8], index: usize) -> i16 {
        let offset = 44 + index * 2;
        i16::from_le_bytes([wav[offset], wav[offset + 1]])
    }

    #[test]
    fn wav_framing_is_well_formed() {
        let tone = Tone {
            delay: 0.0,
            frequency: 440.0,
            waveform: Waveform::Sine,
            duration: 0.1,
            volume: 0.1,
        };
        let wav = render_wav(&[tone], 0.1);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        let expected_samples = (0.1 * SAMPLE_RATE as f32) as usize;
        assert_eq!(wav.len(), 44 + expected_samples * 2);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size as usize, expected_samples * 2);
    }

    #[test]
    fn square_wave_flips_polarity_at_half_period() {
        let tone = Tone {
            delay: 0.0,
            frequency: 100.0,
            waveform: Waveform::Square,
            duration: 0.1,
            volume: 0.2,
        };
        let wav = render_wav(&[tone], 0.1);

        // 100 Hz at 44100 Hz: one period is 441 samples.
        assert!(sample_at(&wav, 10) > 0);
        assert!(sample_at(&wav, 230) < 0);
    }

    #[test]
    fn delayed_tone_starts_on_schedule() {
        let wav = render_wav(EAT_TONES, cue_seconds(EAT_TONES));
        let expected_samples = (0.15 * SAMPLE_RATE as f32) as usize;
        assert_eq!(wav.len(), 44 + expected_samples * 2);
    }

    #[test]
    fn envelope_decays_towards_the_floor() {
        let tone = Tone {
            delay: 0.0,
            frequency: 100.0,
            waveform: Waveform::Square,
            duration: 0.5,
            volume: 0.2,
        };
        let wav = render_wav(&[tone], 0.5);

        // Compare peaks early and late in the tone; square keeps the
        // envelope directly visible in the magnitude.
        let early = sample_at(&wav, 10).abs();
        let late = sample_at(&wav, (0.45 * SAMPLE_RATE as f32) as usize + 10).abs();
        assert!(early > late * 4, "early {early}, late {late}");
    }

    #[test]
    fn music_loop_spans_all_sixteen_steps() {
        let wav = music_wav();
        let expected_samples = (2.4 * SAMPLE_RATE as f32) as usize;
        assert_eq!(wav.len(), 44 + expected_samples * 2);
    }

    #[test]
    fn music_rests_are_silent() {
        let wav = music_wav();
        // Step 0's note ends at 0.1 s; step 1 is a rest until 0.3 s.
        // 0.18 s sits inside the gap.
        let gap = (0.18 * SAMPLE_RATE as f32) as usize;
        for i in 0..100 {
            assert_eq!(sample_at(&wav, gap + i), 0);
        }
    }

    #[test]
    fn zero_volume_tone_renders_silence() {
        let tone = Tone {
            delay: 0.0,
            frequency: 440.0,
            waveform: Waveform::Sawtooth,
            duration: 0.05,
            volume: 0.0,
        };
        let wav = render_wav(&[tone], 0.05);
        for i in 0..(0.05 * SAMPLE_RATE as f32) as usize {
            assert_eq!(sample_at(&wav, i), 0);
        }
    }

    #[test]
    fn cue_lengths_cover_their_last_tone() {
        assert_eq!(cue_seconds(EAT_TONES), 0.15);
        assert_eq!(cue_seconds(GAME_OVER_TONES), 0.7);
        assert_eq!(cue_seconds(MENU_MOVE_TONES), 0.05);
        assert_eq!(cue_seconds(MENU_SELECT_TONES), 0.25);
    }
}
