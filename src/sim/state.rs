//! Round state and core simulation types
//!
//! A `GameState` is one round: the level controller, the flock, and the RNG
//! that drives both. It is built fresh at every round start.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::level::{Level, Overlay};
use super::sheep::{ClickOutcome, Sheep};
use super::spawn::place_agents;
use crate::config::LevelConfig;
use crate::consts::*;
use crate::error::GameError;

/// Notifications for the front end (drained every frame)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Show or hide an overlay
    SetVisible { element: Overlay, visible: bool },
    /// Click feedback on a sheep
    ScalePulse { sheep: u32, factor: f32, duration: f32 },
    /// Switch to another level
    LoadLevel(String),
    SheepCounted { sheep: u32, count: u32, total: u32 },
    DoubleCounted { sheep: u32 },
}

/// One round of play
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub level: Level,
    /// Sorted by id
    pub sheep: Vec<Sheep>,
    /// Radius of the wall that keeps the flock in
    pub field_radius: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Check the level, place the flock, and start the level
    pub fn new(config: &LevelConfig, restart_level: &str, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let positions = place_agents(
            &mut rng,
            config.total_sheep as usize,
            config.range,
            DEFAULT_MIN_SEPARATION,
        )?;
        let sheep = spawn_flock(&positions, config, &mut rng);

        let mut events = Vec::new();
        let level = Level::start(config, restart_level, &mut events);

        Ok(Self {
            seed,
            level,
            sheep,
            field_radius: config.range + FIELD_MARGIN,
            time_ticks: 0,
            events,
            rng,
        })
    }

    pub fn sheep(&self, id: u32) -> Option<&Sheep> {
        self.sheep
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &self.sheep[i])
    }

    /// Deliver a click to one sheep and feed the outcome to the level.
    ///
    /// Clicks after the round is decided are dropped without touching the sheep.
    pub fn click_sheep(&mut self, id: u32) {
        if self.level.is_terminal() {
            log::debug!("Ignoring click on sheep {} after round end", id);
            return;
        }
        let Ok(index) = self.sheep.binary_search_by_key(&id, |s| s.id) else {
            log::warn!("Click on unknown sheep {}", id);
            return;
        };

        let sheep = &mut self.sheep[index];
        match sheep.on_click() {
            ClickOutcome::Counted => {
                self.events.push(GameEvent::ScalePulse {
                    sheep: id,
                    factor: PULSE_SCALE,
                    duration: PULSE_DURATION,
                });
                self.level.count_sheep(&mut self.events);
                self.events.push(GameEvent::SheepCounted {
                    sheep: id,
                    count: self.level.sheep_count(),
                    total: self.level.total_sheep(),
                });
            }
            ClickOutcome::DoubleCounted => {
                self.events.push(GameEvent::DoubleCounted { sheep: id });
                self.level.double_count(&mut self.events);
            }
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot as JSON for front ends and debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One sheep per position, ids starting at 1
fn spawn_flock(positions: &[Vec2], config: &LevelConfig, rng: &mut Pcg32) -> Vec<Sheep> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| Sheep::spawn(i as u32 + 1, *p, config.sheep, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, PlacementError};
    use crate::sim::gaussian::Gaussian;
    use crate::sim::level::LevelPhase;
    use crate::sim::sheep::SheepConfig;

    fn config(total: u32) -> LevelConfig {
        LevelConfig {
            id: "meadow".into(),
            total_sheep: total,
            range: 5.0,
            next: "hillside".into(),
            intro: false,
            sheep: SheepConfig::default(),
        }
    }

    #[test]
    fn test_new_round_spawns_flock() {
        let state = GameState::new(&config(8), "meadow", 3).unwrap();
        assert_eq!(state.sheep.len(), 8);
        let ids: Vec<u32> = state.sheep.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());

        for (i, a) in state.sheep.iter().enumerate() {
            assert!(a.body.ground_pos().length() <= 5.0 + 1e-4);
            for b in &state.sheep[i + 1..] {
                assert!(a.body.ground_pos().distance(b.body.ground_pos()) >= 1.0);
            }
        }
        assert_eq!(state.level.phase, LevelPhase::Playing);
    }

    #[test]
    fn test_crowded_level_fails_to_build() {
        let mut cfg = config(50);
        cfg.range = 1.0;
        assert!(matches!(
            GameState::new(&cfg, "meadow", 3),
            Err(GameError::Placement(PlacementError::Infeasible { .. }))
        ));
    }

    #[test]
    fn test_unvalidated_level_is_rejected() {
        let mut cfg = config(3);
        cfg.sheep.graze = Gaussian::new(f32::INFINITY, 0.0);
        assert!(matches!(
            GameState::new(&cfg, "meadow", 3),
            Err(GameError::Config(ConfigError::InvalidLevel { .. }))
        ));

        let mut cfg = config(3);
        cfg.range = f32::NAN;
        assert!(matches!(
            GameState::new(&cfg, "meadow", 3),
            Err(GameError::Config(ConfigError::InvalidLevel { .. }))
        ));
    }

    #[test]
    fn test_three_counts_win() {
        let mut state = GameState::new(&config(3), "meadow", 1).unwrap();
        state.drain_events();

        state.click_sheep(1);
        state.click_sheep(2);
        assert_eq!(state.level.sheep_count(), 2);
        state.click_sheep(3);
        assert_eq!(state.level.sheep_count(), 3);
        assert_eq!(state.level.phase, LevelPhase::Won);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScalePulse {
            sheep: 1,
            factor: PULSE_SCALE,
            duration: PULSE_DURATION
        }));
        assert!(events.contains(&GameEvent::SheepCounted {
            sheep: 3,
            count: 3,
            total: 3
        }));

        // Clicking after the win changes nothing
        state.click_sheep(1);
        assert_eq!(state.level.phase, LevelPhase::Won);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_double_click_loses_round() {
        let mut state = GameState::new(&config(3), "meadow", 1).unwrap();
        state.click_sheep(1);
        state.click_sheep(1);
        assert_eq!(state.level.phase, LevelPhase::Lost);
        assert_eq!(state.level.sheep_count(), 1);

        // No further state changes
        state.click_sheep(2);
        assert_eq!(state.level.sheep_count(), 1);
        assert!(!state.sheep(2).unwrap().is_counted());
        assert_eq!(state.level.phase, LevelPhase::Lost);
    }

    #[test]
    fn test_unknown_sheep_is_ignored() {
        let mut state = GameState::new(&config(3), "meadow", 1).unwrap();
        state.drain_events();
        state.click_sheep(99);
        assert_eq!(state.level.sheep_count(), 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(&config(2), "meadow", 1).unwrap();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"sheep\""));
        assert!(json.contains("meadow"));
    }
}
