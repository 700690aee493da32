//! Tyk-Tyk - click the bouncing circles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (circles, clicks, score, speed)
//! - `render`: Drawing interface the simulation talks to
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame scheduling and input mapping
//! - `app`: Glue between a platform event loop and the simulation

pub mod app;
pub mod error;
pub mod platform;
pub mod render;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::{SettingsError, SettingsResult};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::render::Color;

    pub const TITLE: &str = "Tyk-Tyk";

    /// Window dimensions (logical pixels, fixed)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Simulation ticks per second
    pub const TICK_RATE: f64 = 60.0;
    /// Fixed simulation timestep
    pub const TICK_DT: f64 = 1.0 / TICK_RATE;
    /// Maximum ticks replayed in one frame before dropping time
    pub const MAX_CATCH_UP_TICKS: u32 = 4;
    /// Stalls longer than this (seconds) are discarded instead of replayed
    pub const MAX_FRAME_GAP: f64 = 0.25;

    /// Circle defaults
    pub const MIN_CIRCLES: usize = 3;
    pub const MAX_CIRCLES: usize = 7;
    /// Largest `max_circles` a settings file may ask for. Each active circle
    /// takes two renderer discs; the rest of the budget is for popping ones.
    pub const CIRCLE_LIMIT: usize = 32;
    pub const MIN_RADIUS: f32 = 15.0;
    pub const MAX_RADIUS: f32 = 35.0;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 3.0;
    /// Lowest color channel value, keeps circles away from near-black
    pub const MIN_CHANNEL: u8 = 100;
    /// Radius lost per frame while popping
    pub const POP_SPEED: f32 = 0.7;
    /// Popping circles below this radius are destroyed
    pub const POP_END_RADIUS: f32 = 1.0;

    /// Global speed multiplier
    pub const INITIAL_MULTIPLIER: f64 = 0.5;
    pub const MULTIPLIER_STEP: f64 = 0.025;

    /// Colors
    pub const BACKGROUND_COLOR: Color = Color::new(20, 30, 40);
    pub const OUTLINE_COLOR: Color = Color::new(255, 255, 255);
    pub const TEXT_COLOR: Color = Color::new(220, 220, 220);
    pub const SECONDARY_TEXT_COLOR: Color = Color::new(200, 200, 200);
    pub const HINT_TEXT_COLOR: Color = Color::new(180, 180, 200);
    pub const HELP_TEXT_COLOR: Color = Color::new(160, 160, 180);

    /// HUD layout
    pub const HUD_MARGIN: f32 = 20.0;
    pub const HUD_FONT_SIZE: f32 = 30.0;
    pub const HINT_FONT_SIZE: f32 = 24.0;
    pub const HELP_FONT_SIZE: f32 = 20.0;
    pub const HINT_TEXT: &str = "Click the circles with the left mouse button to pop them";
    pub const HELP_TEXT: &str = "R - new game | ESC - quit";
}
