//! Glue between a platform event loop and the simulation
//!
//! Backends own the window and the GPU; [`App`] owns everything else. They
//! feed it input events and timestamps, and present whatever frame it hands
//! back.

use crate::consts::{HELP_TEXT, TITLE};
use crate::platform::{Command, FrameClock, InputEvent};
use crate::render::{Anchor, DrawList};
use crate::settings::Settings;
use crate::sim::{self, GameState};

/// Game instance holding all state
pub struct App {
    pub state: GameState,
    clock: FrameClock,
    frame: DrawList,
    quit: bool,
}

impl App {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let state = GameState::new(seed, settings);
        log::info!(
            "Game initialized with seed {} ({} circles)",
            seed,
            state.active_count()
        );
        Self {
            state,
            clock: FrameClock::default(),
            frame: DrawList::new(),
            quit: false,
        }
    }

    /// Dispatch one input event. Unrecognized input is ignored.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event.command() {
            Some(Command::Click(pos)) => {
                self.state.handle_click(pos);
            }
            Some(Command::Reset) => {
                self.state.reset();
                self.clock.reset();
            }
            Some(Command::Quit) => {
                log::info!("Quit requested (final score {})", self.state.score);
                self.quit = true;
            }
            None => {}
        }
    }

    /// Run the ticks due at `now` (seconds), drawing after each one.
    ///
    /// Every draw starts with a fill, so the list ends up holding the last
    /// one.
    /// Returns `None` when no tick was due or after a quit was requested.
    pub fn frame(&mut self, now: f64) -> Option<&DrawList> {
        if self.quit {
            return None;
        }

        let ticks = self.clock.advance(now);
        if ticks == 0 {
            return None;
        }
        for _ in 0..ticks {
            sim::update(&mut self.state);
            sim::draw(&mut self.state, &mut self.frame);
        }
        Some(&self.frame)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Window title carrying the corner HUD counters and the key hints, for
/// backends that cannot draw text:
/// `Tyk-Tyk | Score: 3 | Speed: x0.6 | R - new game | ESC - quit`
pub fn title_text(frame: &DrawList) -> String {
    let mut title = String::from(TITLE);
    for (text, anchor, ..) in frame.texts() {
        if matches!(anchor, Anchor::TopLeft(_) | Anchor::TopRight(_)) {
            title.push_str(" | ");
            title.push_str(text);
        }
    }
    title.push_str(" | ");
    title.push_str(HELP_TEXT);
    title
}
