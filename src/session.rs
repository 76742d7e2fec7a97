//! Session orchestrator
//!
//! Owns the level catalog and the current round. Rounds never look anything
//! up on their own: the session builds each `GameState` with everything it
//! needs and replaces it wholesale when the round asks for another level.

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::error::{ConfigError, GameError};
use crate::sim::{FrameClock, GameEvent, GameState, LevelPhase, TickInput, tick};

/// A play session across many rounds
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    seed: u64,
    round: GameState,
    clock: FrameClock,
    /// Clicks waiting for the next tick
    input: TickInput,
    outbox: Vec<GameEvent>,
    /// Level that failed to build and is retried on the next step
    pending_load: Option<String>,
    /// Round builds attempted, for per-build seeds
    builds: u32,
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
}

impl Session {
    /// Validate the catalog, check every level can be placed, and start the first one
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        for level in &config.levels {
            build_round(&config, &level.id, round_seed(seed, 0))?;
        }
        let round = build_round(&config, &config.start_level, round_seed(seed, 0))?;
        log::info!("Session started at {} (seed {})", config.start_level, seed);

        Ok(Self {
            config,
            seed,
            round,
            clock: FrameClock::new(),
            input: TickInput::default(),
            outbox: Vec::new(),
            pending_load: None,
            builds: 0,
            rounds_played: 0,
            wins: 0,
            losses: 0,
        })
    }

    /// The round in progress
    pub fn round(&self) -> &GameState {
        &self.round
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Queue a click on a sheep for the next tick
    pub fn click(&mut self, sheep: u32) {
        self.input.clicks.push(sheep);
    }

    /// Advance by a variable frame delta, running whole fixed ticks
    pub fn update(&mut self, frame_dt: f32) -> Result<(), GameError> {
        for _ in 0..self.clock.ticks_for(frame_dt) {
            self.step()?;
        }
        Ok(())
    }

    /// Run exactly one fixed tick.
    ///
    /// While a level load is failing, retries the load instead of ticking the
    /// finished round.
    pub fn step(&mut self) -> Result<(), GameError> {
        if let Some(id) = self.pending_load.clone() {
            return self.load_level(&id);
        }

        let input = std::mem::take(&mut self.input);
        tick(&mut self.round, &input, SIM_DT);

        let mut load = None;
        for event in self.round.drain_events() {
            if let GameEvent::LoadLevel(id) = &event {
                load = Some(id.clone());
            }
            self.outbox.push(event);
        }

        if let Some(id) = load {
            self.load_level(&id)?;
        }
        Ok(())
    }

    /// Throw away the current round and start `id` from scratch.
    ///
    /// On failure the current round and the tallies are left untouched and the
    /// load stays pending.
    pub fn load_level(&mut self, id: &str) -> Result<(), GameError> {
        self.builds += 1;
        let seed = round_seed(self.seed, self.builds);
        let round = match build_round(&self.config, id, seed) {
            Ok(round) => round,
            Err(err) => {
                log::error!("Failed to load level {}: {}", id, err);
                self.pending_load = Some(id.to_string());
                return Err(err);
            }
        };

        match self.round.level.phase {
            LevelPhase::Won => self.wins += 1,
            LevelPhase::Lost => self.losses += 1,
            LevelPhase::Intro | LevelPhase::Playing => {}
        }
        self.rounds_played += 1;
        self.round = round;
        self.pending_load = None;
        // Pending clicks were aimed at the old flock
        self.input.clicks.clear();
        Ok(())
    }

    /// Take everything the rounds have reported since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }
}

fn build_round(config: &GameConfig, id: &str, seed: u64) -> Result<GameState, GameError> {
    let level = config
        .level(id)
        .ok_or_else(|| ConfigError::UnknownLevel(id.to_string()))?;
    Ok(GameState::new(level, &config.restart_level, seed)?)
}

/// Distinct but reproducible seed per round
fn round_seed(session_seed: u64, round: u32) -> u64 {
    (round as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(session_seed)
}
