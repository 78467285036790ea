use log::info;
use macroquad::prelude::KeyCode;

use crate::audio::{AudioBank, Cue};
use crate::config::Config;
use crate::game::{Direction, GameSession, Grid, StepResult};
use crate::menu::{Menu, MenuAction};
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Fixed-period tick source fed with frame deltas. Fires at most once
/// per frame; leftover time is discarded, like a restarted interval.
struct TickTimer {
    interval: f64,
    elapsed: f64,
}

impl TickTimer {
    fn new(interval: f64) -> Self {
        TickTimer { interval, elapsed: 0.0 }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Top-level state machine: which of the four states owns input, the
/// live session if any, the active menu, and the tick timer. There is
/// exactly one timer, and it only runs while Playing.
pub struct App {
    grid: Grid,
    state: GameState,
    menu: Menu,
    session: Option<GameSession>,
    final_score: u32,
    timer: TickTimer,
    audio: AudioBank,
    running: bool,
}

impl App {
    pub fn new(config: &Config, audio: AudioBank) -> Self {
        App {
            grid: Grid::new(config.grid_width, config.grid_height),
            state: GameState::Start,
            menu: Menu::start(),
            session: None,
            final_score: 0,
            timer: TickTimer::new(config.tick_ms as f64 / 1000.0),
            audio,
            running: true,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::M {
            let muted = self.audio.toggle_mute();
            info!("sound {}", if muted { "muted" } else { "unmuted" });
            return;
        }

        match self.state {
            GameState::Playing => self.handle_game_key(key),
            _ => self.handle_menu_key(key),
        }
    }

    /// Runs the simulation while Playing: at most one step per frame,
    /// once the tick period has elapsed. A stale tick can never touch a
    /// paused or discarded session because the timer is only consulted
    /// in the Playing state and reset on every (re)entry.
    pub fn advance(&mut self, dt: f64) {
        if self.state != GameState::Playing {
            return;
        }
        if !self.timer.advance(dt) {
            return;
        }

        let result = match &mut self.session {
            Some(session) => session.step(),
            None => return,
        };
        if result.is_fatal() {
            self.game_over();
        } else if result == StepResult::Ate {
            self.audio.play(Cue::Eat);
        }
    }

    pub fn draw(&self) {
        render::draw_background(self.grid);
        match self.state {
            GameState::Start => {
                render::draw_menu(&self.menu, Some("Arrows/WASD to steer, Esc to pause"));
            }
            GameState::Playing => {
                if let Some(session) = &self.session {
                    render::draw_session(session);
                    render::draw_score(session.score());
                }
            }
            GameState::Paused => {
                if let Some(session) = &self.session {
                    render::draw_session(session);
                }
                render::draw_dim_overlay();
                render::draw_menu(&self.menu, None);
            }
            GameState::GameOver => {
                if let Some(session) = &self.session {
                    render::draw_session(session);
                }
                render::draw_dim_overlay();
                let line = format!("Final score: {}", self.final_score);
                render::draw_menu(&self.menu, Some(&line));
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyCode) {
        if key == KeyCode::Escape {
            self.pause();
            return;
        }
        let direction = match key {
            KeyCode::Up | KeyCode::W => Direction::Up,
            KeyCode::Down | KeyCode::S => Direction::Down,
            KeyCode::Left | KeyCode::A => Direction::Left,
            KeyCode::Right | KeyCode::D => Direction::Right,
            _ => return, // unrecognized keys are ignored
        };
        if let Some(session) = &mut self.session {
            session.queue_direction(direction);
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::W => {
                self.menu.move_up();
                self.audio.play(Cue::MenuMove);
            }
            KeyCode::Down | KeyCode::S => {
                self.menu.move_down();
                self.audio.play(Cue::MenuMove);
            }
            KeyCode::Enter => {
                self.audio.play(Cue::MenuSelect);
                self.apply_action(self.menu.selected_action());
            }
            _ => {}
        }
    }

    fn apply_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Start | MenuAction::Retry => self.start_session(),
            MenuAction::Resume => self.resume(),
            MenuAction::Quit => self.quit_to_title(),
            MenuAction::Exit => {
                info!("exit selected");
                self.audio.stop_music();
                self.running = false;
            }
        }
    }

    fn start_session(&mut self) {
        self.session = Some(GameSession::new(self.grid));
        self.timer.reset();
        self.state = GameState::Playing;
        self.audio.start_music();
        info!("session started on {}x{} grid", self.grid.width, self.grid.height);
    }

    fn pause(&mut self) {
        self.state = GameState::Paused;
        self.menu = Menu::paused();
        self.audio.set_music_audible(false);
    }

    fn resume(&mut self) {
        self.timer.reset();
        self.state = GameState::Playing;
        self.audio.set_music_audible(true);
    }

    fn quit_to_title(&mut self) {
        self.session = None;
        self.state = GameState::Start;
        self.menu = Menu::start();
        self.audio.stop_music();
        info!("session discarded, back to title");
    }

    fn game_over(&mut self) {
        self.final_score = self.session.as_ref().map_or(0, GameSession::score);
        self.state = GameState::GameOver;
        self.menu = Menu::game_over();
        self.audio.stop_music();
        self.audio.play(Cue::GameOver);
        info!("game over, final score {}", self.final_score);
    }
}
