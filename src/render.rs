use macroquad::prelude::*;

use crate::game::{Cell, GameSession, Grid};
use crate::menu::Menu;

pub const TILE_SIZE: f32 = 20.0;

// Game palette.
const COLOR_BG: Color = Color::new(0.067, 0.067, 0.067, 1.0); // #111
const COLOR_GRID_LINE: Color = Color::new(0.102, 0.102, 0.102, 1.0); // #1a1a1a
const COLOR_SNAKE_TOP: Color = Color::new(0.157, 0.878, 0.157, 1.0); // #28e028
const COLOR_SNAKE_SIDE: Color = Color::new(0.102, 0.361, 0.102, 1.0); // #1a5c1a
const COLOR_APPLE: Color = Color::new(1.0, 0.2, 0.2, 1.0); // #ff3333
const COLOR_APPLE_SIDE: Color = Color::new(0.6, 0.0, 0.0, 1.0); // #990000
const COLOR_OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.55);

const TITLE_FONT_SIZE: u16 = 48;
const MENU_FONT_SIZE: u16 = 28;
const SUBTITLE_FONT_SIZE: u16 = 24;

/// Clears the frame and draws the subtle tile grid.
pub fn draw_background(grid: Grid) {
    clear_background(COLOR_BG);

    let width = grid.width as f32 * TILE_SIZE;
    let height = grid.height as f32 * TILE_SIZE;
    for i in 0..=grid.width {
        let x = i as f32 * TILE_SIZE;
        draw_line(x, 0.0, x, height, 1.0, COLOR_GRID_LINE);
    }
    for i in 0..=grid.height {
        let y = i as f32 * TILE_SIZE;
        draw_line(0.0, y, width, y, 1.0, COLOR_GRID_LINE);
    }
}

pub fn draw_session(session: &GameSession) {
    draw_cube(session.food(), COLOR_APPLE, COLOR_APPLE_SIDE);
    for &cell in session.snake() {
        draw_cube(cell, COLOR_SNAKE_TOP, COLOR_SNAKE_SIDE);
    }
}

// Low-poly cube look: side face offset down-right, top face over it,
// both inset by the tile gap.
fn draw_cube(cell: Cell, top: Color, side: Color) {
    let px = cell.x as f32 * TILE_SIZE;
    let py = cell.y as f32 * TILE_SIZE;
    let size = TILE_SIZE - 2.0;

    draw_rectangle(px + 2.0, py + 2.0, size, size, side);
    draw_rectangle(px, py, size, size, top);
}

pub fn draw_score(score: u32) {
    draw_text(&format!("Score: {score}"), 8.0, 24.0, 24.0, COLOR_SNAKE_TOP);
}

/// Dims the playfield under a menu.
pub fn draw_dim_overlay() {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), COLOR_OVERLAY);
}

/// Centered title, optional subtitle line, then the items with the
/// selected one highlighted.
pub fn draw_menu(menu: &Menu, subtitle: Option<&str>) {
    let sw = screen_width();
    let sh = screen_height();

    let title = menu.title();
    let tm = measure_text(title, None, TITLE_FONT_SIZE, 1.0);
    let mut y = sh * 0.3;
    draw_text(title, (sw - tm.width) * 0.5, y, TITLE_FONT_SIZE as f32, COLOR_SNAKE_TOP);
    y += 48.0;

    if let Some(line) = subtitle {
        let m = measure_text(line, None, SUBTITLE_FONT_SIZE, 1.0);
        draw_text(line, (sw - m.width) * 0.5, y, SUBTITLE_FONT_SIZE as f32, WHITE);
        y += 36.0;
    }
    y += 8.0;

    for (i, item) in menu.items().iter().enumerate() {
        let selected = i == menu.selected();
        let color = if selected { WHITE } else { GRAY };
        let label = if selected {
            format!("> {} <", item.label)
        } else {
            item.label.to_string()
        };
        let m = measure_text(&label, None, MENU_FONT_SIZE, 1.0);
        draw_text(&label, (sw - m.width) * 0.5, y, MENU_FONT_SIZE as f32, color);
        y += 32.0;
    }
}
