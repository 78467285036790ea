use std::fs::File;

use log::info;
use macroquad::prelude::*;
use simplelog::{LevelFilter, WriteLogger};

mod app;
mod audio;
mod config;
mod game;
mod menu;
mod render;

use app::App;
use audio::AudioBank;
use config::Config;
use render::TILE_SIZE;

const LOG_FILE: &str = "snake_arcade.log";

fn window_conf() -> Conf {
    // macroquad asks for the window size before main runs, so the
    // config is read here as well.
    let config = Config::load();
    Conf {
        window_title: "Snake".to_owned(),
        window_width: config.grid_width * TILE_SIZE as i32,
        window_height: config.grid_height * TILE_SIZE as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() {
    match File::create(LOG_FILE) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
        }
        Err(err) => eprintln!("logging disabled: {err}"),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    info!("snake_arcade {} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let audio = AudioBank::load(config.volume, config.muted).await;
    let mut app = App::new(&config, audio);

    let mut last_time = get_time();
    while app.running() {
        let now = get_time();
        let dt = (now - last_time).max(0.0);
        last_time = now;

        for key in get_keys_pressed() {
            app.handle_key(key);
        }
        app.advance(dt);
        app.draw();

        next_frame().await;
    }

    info!("clean shutdown");
}
