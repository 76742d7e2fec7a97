//! Level progress: counting, double-count penalty, win/lose, round clock
//!
//! One `Level` lives for one round. `Won` and `Lost` are terminal: after
//! either, further counts are ignored and the only thing left to do is hold
//! the result overlay and then ask for the next level.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::GameEvent;
use crate::config::LevelConfig;
use crate::consts::PRESENTATION_HOLD;

/// Overlay elements the level toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    Intro,
    Timer,
    Win,
    Lose,
}

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Intro overlay is up, clock not yet running
    Intro,
    Playing,
    Won,
    Lost,
}

/// Clock reading split into display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub minutes: u32,
    pub seconds: u32,
    pub centiseconds: u32,
}

impl ClockReading {
    /// Split elapsed seconds into wall-clock fields.
    ///
    /// Rounds to the nearest millisecond first; centiseconds truncate from
    /// there. Minutes wrap at one hour.
    pub fn from_secs(elapsed: f64) -> Self {
        let total_ms = (elapsed.max(0.0) * 1000.0).round() as u64;
        Self {
            minutes: ((total_ms / 60_000) % 60) as u32,
            seconds: ((total_ms / 1000) % 60) as u32,
            centiseconds: ((total_ms % 1000) / 10) as u32,
        }
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:02}",
            self.minutes, self.seconds, self.centiseconds
        )
    }
}

/// Format elapsed seconds as `MM:SS.cc`
pub fn format_clock(elapsed: f64) -> String {
    ClockReading::from_secs(elapsed).to_string()
}

/// Round stopwatch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundTimer {
    pub elapsed: f64,
    pub running: bool,
}

impl RoundTimer {
    /// Zero the clock and start it
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt as f64;
        }
    }

    pub fn reading(&self) -> ClockReading {
        ClockReading::from_secs(self.elapsed)
    }
}

/// Progress controller for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub phase: LevelPhase,
    pub timer: RoundTimer,
    total_sheep: u32,
    sheep_count: u32,
    next: String,
    restart: String,
    /// Time left on the current intro/win/lose overlay
    hold_remaining: f32,
    navigation_requested: bool,
}

impl Level {
    /// Begin a round: show the intro if configured, otherwise start the clock
    pub fn start(config: &LevelConfig, restart: &str, events: &mut Vec<GameEvent>) -> Self {
        let mut level = Self {
            id: config.id.clone(),
            phase: LevelPhase::Playing,
            timer: RoundTimer::default(),
            total_sheep: config.total_sheep,
            sheep_count: 0,
            next: config.next.clone(),
            restart: restart.to_string(),
            hold_remaining: 0.0,
            navigation_requested: false,
        };

        if config.intro {
            level.phase = LevelPhase::Intro;
            level.hold_remaining = PRESENTATION_HOLD;
            events.push(GameEvent::SetVisible {
                element: Overlay::Intro,
                visible: true,
            });
        } else {
            level.start_clock(events);
        }

        log::info!(
            "Level {} started: {} sheep, next {}",
            level.id,
            level.total_sheep,
            level.next
        );
        level
    }

    #[inline]
    pub fn sheep_count(&self) -> u32 {
        self.sheep_count
    }

    #[inline]
    pub fn total_sheep(&self) -> u32 {
        self.total_sheep
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, LevelPhase::Won | LevelPhase::Lost)
    }

    /// Whether the post-round navigation request has gone out
    #[inline]
    pub fn navigation_requested(&self) -> bool {
        self.navigation_requested
    }

    /// A sheep was counted for the first time
    pub fn count_sheep(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_terminal() {
            return;
        }

        self.sheep_count += 1;
        if self.sheep_count >= self.total_sheep {
            self.sheep_count = self.total_sheep;
            log::info!(
                "Level {} won in {}",
                self.id,
                self.timer.reading()
            );
            self.finish(LevelPhase::Won, Overlay::Win, events);
        }
    }

    /// A counted sheep was clicked again: the round is lost
    pub fn double_count(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_terminal() {
            return;
        }
        log::info!(
            "Level {} lost on a double count ({}/{})",
            self.id,
            self.sheep_count,
            self.total_sheep
        );
        self.finish(LevelPhase::Lost, Overlay::Lose, events);
    }

    /// Advance overlays and the round clock
    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        match self.phase {
            LevelPhase::Intro => {
                self.hold_remaining -= dt;
                if self.hold_remaining <= 0.0 {
                    self.hold_remaining = 0.0;
                    events.push(GameEvent::SetVisible {
                        element: Overlay::Intro,
                        visible: false,
                    });
                    self.phase = LevelPhase::Playing;
                    self.start_clock(events);
                }
            }
            LevelPhase::Playing => self.timer.advance(dt),
            LevelPhase::Won | LevelPhase::Lost => {
                if self.navigation_requested {
                    return;
                }
                self.hold_remaining -= dt;
                if self.hold_remaining <= 0.0 {
                    self.hold_remaining = 0.0;
                    self.navigation_requested = true;
                    let target = if self.phase == LevelPhase::Won {
                        self.next.clone()
                    } else {
                        self.restart.clone()
                    };
                    log::info!("Level {} -> loading {}", self.id, target);
                    events.push(GameEvent::LoadLevel(target));
                }
            }
        }
    }

    fn start_clock(&mut self, events: &mut Vec<GameEvent>) {
        self.timer.restart();
        events.push(GameEvent::SetVisible {
            element: Overlay::Timer,
            visible: true,
        });
    }

    fn finish(&mut self, phase: LevelPhase, overlay: Overlay, events: &mut Vec<GameEvent>) {
        self.timer.stop();
        if self.phase == LevelPhase::Intro {
            events.push(GameEvent::SetVisible {
                element: Overlay::Intro,
                visible: false,
            });
        }
        self.phase = phase;
        self.hold_remaining = PRESENTATION_HOLD;
        events.push(GameEvent::SetVisible {
            element: overlay,
            visible: true,
        });
    }
}
