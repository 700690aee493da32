//! Per-tick update and per-frame draw
//!
//! The platform loop calls [`update`] once per fixed tick and [`draw`] once
//! per presented frame.

use glam::Vec2;

use super::circle::Fate;
use super::state::GameState;
use crate::consts::*;
use crate::render::{Anchor, Canvas};

/// Advance the game by one tick.
///
/// Popped circles move from the active list to the popping list and are
/// replaced by a fresh circle appended to the active list. Every circle that
/// was active at the start of the tick moves once; the popping list (including
/// circles relocated this tick) then moves once more. Replacements do not
/// move until the next tick.
pub fn update(state: &mut GameState) {
    state.time_ticks += 1;
    let multiplier = state.speed_multiplier;

    let active = std::mem::take(&mut state.circles);
    let mut kept = Vec::with_capacity(active.len());
    let mut replacements = 0;

    for mut circle in active {
        circle.move_by(multiplier);
        if circle.popping {
            state.popping_circles.push(circle);
            replacements += 1;
        } else {
            kept.push(circle);
        }
    }

    for _ in 0..replacements {
        let circle = state.spawn_circle();
        kept.push(circle);
    }
    state.circles = kept;

    for circle in &mut state.popping_circles {
        circle.move_by(multiplier);
    }
}

/// Draw one frame: background, every circle (active first, then popping),
/// then the HUD.
///
/// Popping circles shrink here. Finished ones are dropped from the popping
/// list; a clicked circle still in the active list stays until `update`
/// relocates it.
pub fn draw(state: &mut GameState, canvas: &mut dyn Canvas) {
    canvas.fill(BACKGROUND_COLOR);

    // Only `update` takes circles out of the active list, so its size never
    // changes even if a clicked circle finishes shrinking before relocation
    for circle in &mut state.circles {
        let _ = circle.draw(canvas);
    }
    state
        .popping_circles
        .retain_mut(|c| c.draw(canvas) == Fate::Alive);

    draw_hud(state, canvas);
}

/// Score, speed and control hints
fn draw_hud(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.text(
        &format!("Score: {}", state.score),
        Anchor::TopLeft(Vec2::new(HUD_MARGIN, HUD_MARGIN)),
        HUD_FONT_SIZE,
        TEXT_COLOR,
    );
    canvas.text(
        &format!("Speed: x{:.1}", state.speed_multiplier),
        Anchor::TopRight(Vec2::new(WIDTH - HUD_MARGIN, HUD_MARGIN)),
        HUD_FONT_SIZE,
        SECONDARY_TEXT_COLOR,
    );
    canvas.text(
        HINT_TEXT,
        Anchor::Center(Vec2::new(WIDTH / 2.0, HEIGHT - 40.0)),
        HINT_FONT_SIZE,
        HINT_TEXT_COLOR,
    );
    canvas.text(
        HELP_TEXT,
        Anchor::Center(Vec2::new(WIDTH / 2.0, HEIGHT - 15.0)),
        HELP_FONT_SIZE,
        HELP_TEXT_COLOR,
    );
}
