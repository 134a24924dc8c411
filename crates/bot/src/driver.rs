//! Timed bot driver
//!
//! Feeds the placement the search picked into the engine as a sequence
//! of commands at a human cadence: think, rotate, shift, drop. Each
//! activity waits its configured delay before the next action. Time
//! comes from the caller as a millisecond counter, so headless runs and
//! tests stay deterministic.

use tracing::{debug, warn};

use blockfall_core::Engine;
use blockfall_types::{
    DEFAULT_DROP_DELAY_MS, DEFAULT_MOVE_DELAY_MS, DEFAULT_ROTATE_DELAY_MS, DEFAULT_THINK_DELAY_MS,
};

use crate::eval::Weights;
use crate::search::{find_best_move, Move};

/// What the driver is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    /// No piece to steer
    Idle,
    /// Waiting out the think delay, then searching for a placement
    Thinking,
    /// Applying the planned rotations
    Rotating,
    /// Shifting toward the planned column
    Moving,
    /// Committing the hard drop
    Dropping,
}

/// Delays between successive bot actions, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    /// Pause before the placement search runs for a new piece
    pub think_delay_ms: u64,
    /// Pause between rotations
    pub rotate_delay_ms: u64,
    /// Pause between horizontal shifts
    pub move_delay_ms: u64,
    /// Pause around the hard drop and the landing sweep
    pub drop_delay_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
            rotate_delay_ms: DEFAULT_ROTATE_DELAY_MS,
            move_delay_ms: DEFAULT_MOVE_DELAY_MS,
            drop_delay_ms: DEFAULT_DROP_DELAY_MS,
        }
    }
}

/// Sequences engine commands toward the best placement the search finds.
///
/// Call [`update`](Self::update) from the outer loop with the current
/// time. The driver plans once per piece, keyed on the engine's piece
/// sequence number, and replans from scratch whenever a new piece
/// appears.
#[derive(Debug, Clone)]
pub struct BotDriver {
    config: BotConfig,
    weights: Weights,
    state: BotState,
    plan: Option<Move>,
    rotations_done: u8,
    planned_seq: u32,
    next_action_at: u64,
}

impl BotDriver {
    pub fn new(config: BotConfig, weights: Weights) -> Self {
        Self {
            config,
            weights,
            state: BotState::Idle,
            plan: None,
            rotations_done: 0,
            planned_seq: 0,
            next_action_at: 0,
        }
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    pub fn plan(&self) -> Option<Move> {
        self.plan
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Advance the driver by one tick. Returns true when it acted on the
    /// engine or advanced its sequence, false while idle or waiting.
    pub fn update(&mut self, engine: &mut Engine, now_ms: u64) -> bool {
        if engine.game_over() {
            self.state = BotState::Idle;
            self.plan = None;
            return false;
        }
        if engine.landed() {
            // Let the drop delay pass before sweeping and spawning
            if now_ms < self.next_action_at {
                return false;
            }
            let cleared = engine.clear_lines();
            if !cleared.is_empty() {
                debug!(rows = cleared.len(), "cleared lines");
            }
            engine.spawn_next();
            self.state = BotState::Idle;
            return true;
        }
        if engine.active().is_none() {
            return false;
        }

        let seq = engine.piece_seq();
        if seq != self.planned_seq || self.state == BotState::Idle {
            self.planned_seq = seq;
            self.plan = None;
            self.rotations_done = 0;
            self.state = BotState::Thinking;
            self.next_action_at = now_ms + self.config.think_delay_ms;
            return false;
        }
        if now_ms < self.next_action_at {
            return false;
        }

        match self.state {
            BotState::Idle => false,
            BotState::Thinking => self.think(engine, now_ms),
            BotState::Rotating => self.rotate(engine, now_ms),
            BotState::Moving => self.shift(engine, now_ms),
            BotState::Dropping => self.drop(engine, now_ms),
        }
    }

    fn think(&mut self, engine: &mut Engine, now_ms: u64) -> bool {
        let Some(kind) = engine.active().map(|p| p.kind) else {
            return false;
        };
        match find_best_move(engine, &self.weights) {
            Some(plan) => {
                debug!(
                    piece = kind.as_str(),
                    rotations = plan.rotations,
                    column = plan.column,
                    score = plan.score,
                    "planned placement"
                );
                self.plan = Some(plan);
                self.rotations_done = 0;
                if plan.rotations > 0 {
                    self.state = BotState::Rotating;
                    self.next_action_at = now_ms + self.config.rotate_delay_ms;
                } else {
                    self.state = BotState::Moving;
                    self.next_action_at = now_ms + self.config.move_delay_ms;
                }
            }
            None => {
                // Nothing fits anywhere; sit idle and let gravity land it
                debug!(piece = kind.as_str(), "no feasible placement");
                self.plan = None;
                self.state = BotState::Idle;
            }
        }
        true
    }

    fn rotate(&mut self, engine: &mut Engine, now_ms: u64) -> bool {
        let Some(plan) = self.plan else {
            self.state = BotState::Thinking;
            self.next_action_at = now_ms + self.config.think_delay_ms;
            return false;
        };
        if self.rotations_done < plan.rotations {
            if engine.rotate() {
                self.rotations_done += 1;
                self.next_action_at = now_ms + self.config.rotate_delay_ms;
            } else {
                warn!("rotation blocked, dropping in place");
                self.state = BotState::Dropping;
                self.next_action_at = now_ms + self.config.drop_delay_ms;
            }
        } else {
            self.state = BotState::Moving;
            self.next_action_at = now_ms + self.config.move_delay_ms;
        }
        true
    }

    fn shift(&mut self, engine: &mut Engine, now_ms: u64) -> bool {
        let Some(plan) = self.plan else {
            self.state = BotState::Thinking;
            self.next_action_at = now_ms + self.config.think_delay_ms;
            return false;
        };
        let Some(piece) = engine.active() else {
            return false;
        };
        let at = piece.x;
        if at == plan.column {
            self.state = BotState::Dropping;
            self.next_action_at = now_ms + self.config.drop_delay_ms;
            return true;
        }
        let moved = if plan.column < at {
            engine.move_left()
        } else {
            engine.move_right()
        };
        if moved {
            self.next_action_at = now_ms + self.config.move_delay_ms;
        } else {
            warn!(want = plan.column, at, "shift blocked, dropping in place");
            self.state = BotState::Dropping;
            self.next_action_at = now_ms + self.config.drop_delay_ms;
        }
        true
    }

    fn drop(&mut self, engine: &mut Engine, now_ms: u64) -> bool {
        let rows = engine.hard_drop();
        debug!(rows, "hard drop");
        self.plan = None;
        self.state = BotState::Idle;
        self.next_action_at = now_ms + self.config.drop_delay_ms;
        true
    }
}

impl Default for BotDriver {
    fn default() -> Self {
        Self::new(BotConfig::default(), Weights::default())
    }
}
