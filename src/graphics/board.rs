use crate::constants::*;
use crate::game::{Food, Renderer, Snake};

use super::font::GLYPH_H;
use super::{Argb, PixelBuffer, P2};

pub const BEIGE: Argb = 0xFF_F5_F5_DC;
pub const INK: Argb = 0xFF_00_00_00;

const SCORE_SCALE: i32 = 3;
const BANNER_SCALE: i32 = 4;

/// Status line as drawn on the canvas.
pub fn score_line(score: u32, high_score: u32) -> String {
    format!("Score: {} High Score: {}", score, high_score)
}

/// World units to canvas pixels. World y grows upward, canvas y downward.
pub fn to_pixel(x: i32, y: i32) -> P2 {
    P2(x - VIEW_MIN, VIEW_MAX - y)
}

/// Renders the game into a `PixelBuffer` one world unit per pixel.
pub struct BoardRenderer {
    pub pix: PixelBuffer,
    dirty: bool,
}

impl BoardRenderer {
    pub fn new() -> Self {
        let mut pix = PixelBuffer::new(VIEW_SIZE, VIEW_SIZE);
        pix.set_background(BEIGE);
        pix.mixerd();

        Self {
            pix,
            dirty: true,
        }
    }

    /// Returns whether anything was drawn since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn draw_board_outline(&mut self) {
        self.pix.color(INK);
        self.pix
            .draw_frame(to_pixel(0, 0), to_pixel(BOARD_EXTENT, BOARD_EXTENT));
    }
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BoardRenderer {
    fn draw_scene(&mut self, snake: &Snake, food: &Food) {
        self.pix.clear();
        self.draw_board_outline();

        for segment in snake.segments() {
            let p = to_pixel(segment.pos.x, segment.pos.y);
            self.pix.color(segment.color);
            self.pix.draw_rect_wh(
                P2(p.0 - HALF_CELL, p.1 - HALF_CELL),
                CELL_PITCH as usize,
                CELL_PITCH as usize,
            );
        }

        let f = food.position();
        self.pix.color(food.color());
        self.pix.draw_circle(to_pixel(f.x, f.y), HALF_CELL, true);

        self.dirty = true;
    }

    fn draw_status(&mut self, score: u32, high_score: u32, game_over: bool) {
        self.pix.color(INK);

        // Label anchors are baselines.
        let line = score_line(score, high_score);
        let base = to_pixel(SCORE_LABEL_X, SCORE_LABEL_Y);
        self.pix.draw_text_centered(
            P2(base.0, base.1 - GLYPH_H * SCORE_SCALE / 2),
            &line,
            SCORE_SCALE,
        );

        if game_over {
            let base = to_pixel(GAME_OVER_LABEL_X, GAME_OVER_LABEL_Y);
            self.pix.draw_text_centered(
                P2(base.0, base.1 - GLYPH_H * BANNER_SCALE / 2),
                "Game Over",
                BANNER_SCALE,
            );
        }

        self.dirty = true;
    }
}
