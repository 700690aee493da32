//! Game state and core simulation types
//!
//! The whole game lives in one [`GameState`] value. It is rebuilt wholesale
//! on reset; nothing carries over except the settings.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::circle::Circle;
use crate::settings::Settings;

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this game was built from
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    /// Clickable circles, in spawn order
    pub circles: Vec<Circle>,
    /// Circles playing their pop animation
    pub popping_circles: Vec<Circle>,
    pub score: u64,
    /// Scales every circle's displacement each tick
    pub speed_multiplier: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next circle ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with a random number of circles in
    /// `[settings.min_circles, settings.max_circles]`
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let count = rng.random_range(settings.min_circles..=settings.max_circles);

        let mut state = Self {
            seed,
            rng,
            speed_multiplier: settings.initial_multiplier,
            settings,
            circles: Vec::with_capacity(count),
            popping_circles: Vec::new(),
            score: 0,
            time_ticks: 0,
            next_id: 1,
        };

        for _ in 0..count {
            let circle = state.spawn_circle();
            state.circles.push(circle);
        }

        state
    }

    /// Start over with fresh circles, zero score and the initial multiplier.
    ///
    /// The new seed is drawn from the current game's RNG, so a sequence of
    /// resets is still reproducible from the first seed.
    pub fn reset(&mut self) {
        let seed = self.rng.random::<u64>();
        *self = Self::new(seed, self.settings.clone());
        log::info!(
            "New game (seed {}, {} circles)",
            self.seed,
            self.circles.len()
        );
    }

    /// Allocate a new circle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a random circle (not yet added to any collection)
    pub fn spawn_circle(&mut self) -> Circle {
        let id = self.next_entity_id();
        Circle::spawn(id, &mut self.rng, &self.settings)
    }

    /// Pop the first clickable circle under `point`.
    ///
    /// Circles are tested in spawn order and at most one pops per click.
    /// Returns the ID of the popped circle.
    pub fn handle_click(&mut self, point: Vec2) -> Option<u32> {
        let circle = self
            .circles
            .iter_mut()
            .find(|c| !c.popping && c.is_clicked(point))?;

        circle.pop();
        let id = circle.id;
        self.score += 1;
        self.speed_multiplier += self.settings.multiplier_step;

        log::debug!(
            "Popped circle {} (score {}, speed x{:.3})",
            id,
            self.score,
            self.speed_multiplier
        );
        Some(id)
    }

    /// Number of clickable circles (constant for the life of a game)
    pub fn active_count(&self) -> usize {
        self.circles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    fn circle(id: u32, pos: Vec2, radius: f32) -> Circle {
        Circle {
            id,
            pos,
            vel: Vec2::new(1.0, 1.0),
            radius,
            color: Color::new(120, 130, 140),
            popping: false,
            pop_speed: 0.7,
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(12345, Settings::default());
        assert!((3..=7).contains(&state.active_count()));
        assert!(state.popping_circles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_multiplier, 0.5);
        assert!(state.circles.iter().all(|c| !c.popping));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(1, Settings::default());
        let extra = state.spawn_circle();
        let mut ids: Vec<u32> = state.circles.iter().map(|c| c.id).collect();
        ids.push(extra.id);
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_circle_count_covers_whole_range() {
        let mut seen = [false; 8];
        for seed in 0..200 {
            seen[GameState::new(seed, Settings::default()).active_count()] = true;
        }
        assert_eq!(&seen[3..=7], &[true; 5]);
        assert!(!seen[..3].iter().any(|&s| s));
    }

    #[test]
    fn test_click_pops_circle() {
        let mut state = GameState::new(1, Settings::default());
        state.circles = vec![circle(10, Vec2::new(100.0, 100.0), 20.0)];

        let popped = state.handle_click(Vec2::new(105.0, 105.0));

        assert_eq!(popped, Some(10));
        assert_eq!(state.score, 1);
        assert!((state.speed_multiplier - 0.525).abs() < 1e-6);
        assert!(state.circles[0].popping);
    }

    #[test]
    fn test_click_miss_changes_nothing() {
        let mut state = GameState::new(1, Settings::default());
        state.circles = vec![
            circle(10, Vec2::new(100.0, 100.0), 20.0),
            circle(11, Vec2::new(300.0, 300.0), 20.0),
        ];

        assert_eq!(state.handle_click(Vec2::new(600.0, 100.0)), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_multiplier, 0.5);
        assert!(state.circles.iter().all(|c| !c.popping));
    }

    #[test]
    fn test_overlapping_click_pops_earliest_only() {
        let mut state = GameState::new(1, Settings::default());
        state.circles = vec![
            circle(10, Vec2::new(100.0, 100.0), 30.0),
            circle(11, Vec2::new(110.0, 100.0), 30.0),
        ];

        assert_eq!(state.handle_click(Vec2::new(105.0, 100.0)), Some(10));
        assert_eq!(state.score, 1);
        assert!(state.circles[0].popping);
        assert!(!state.circles[1].popping);
    }

    #[test]
    fn test_popping_circle_is_not_clickable() {
        let mut state = GameState::new(1, Settings::default());
        state.circles = vec![
            circle(10, Vec2::new(100.0, 100.0), 30.0),
            circle(11, Vec2::new(110.0, 100.0), 30.0),
        ];

        assert_eq!(state.handle_click(Vec2::new(105.0, 100.0)), Some(10));
        // Second click at the same spot falls through to the next circle
        assert_eq!(state.handle_click(Vec2::new(105.0, 100.0)), Some(11));
        assert_eq!(state.score, 2);
        // A third click has nothing left to hit
        assert_eq!(state.handle_click(Vec2::new(105.0, 100.0)), None);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new(99, Settings::default());
        state.score = 12;
        state.speed_multiplier = 0.8;
        state.time_ticks = 500;
        state.popping_circles.push(circle(50, Vec2::new(50.0, 50.0), 10.0));
        let old_seed = state.seed;

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.speed_multiplier, 0.5);
        assert_eq!(state.time_ticks, 0);
        assert!(state.popping_circles.is_empty());
        assert!((3..=7).contains(&state.active_count()));
        assert_ne!(state.seed, old_seed);
    }

    #[test]
    fn test_reset_sequence_is_reproducible() {
        let mut a = GameState::new(2024, Settings::default());
        let mut b = GameState::new(2024, Settings::default());
        a.reset();
        b.reset();
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.circles, b.circles);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let settings = Settings {
            min_circles: 5,
            max_circles: 5,
            ..Default::default()
        };
        let mut state = GameState::new(3, settings.clone());
        state.reset();
        assert_eq!(state.settings, settings);
        assert_eq!(state.active_count(), 5);
    }
}
