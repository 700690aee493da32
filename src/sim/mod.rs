//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Canvas` trait

pub mod circle;
pub mod state;
pub mod tick;

pub use circle::{Circle, Fate};
pub use state::GameState;
pub use tick::{draw, update};
