//! gridfall-engine - falling-block game logic and simulation engine.
//!
//! Provides occupancy-checked movement, piece spawning, merge-and-clear
//! application, and the tick-driven game loop controller.

pub mod apply;
pub mod config;
pub mod controller;
pub mod feed;
pub mod movement;
pub mod scheduler;
pub mod snapshot;

pub use apply::{merge_piece, MergeOutcome};
pub use config::{ConfigError, GameConfig, TICK_PERIOD_MS_DEFAULT};
pub use controller::{Controller, Direction, GameEvent, Phase, StepOutcome};
pub use feed::{RandomFeed, ScriptedFeed, ShapeFeed};
pub use movement::{can_move_to, try_drop, try_move, try_rotate, try_spawn, try_spawn_at};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle};
pub use snapshot::GameSnapshot;
