//! The tick-driven game loop: one live piece against the occupancy field.
//!
//! Explicit state machine, one owned instance, no ambient singletons:
//! Idle until the first input wakes it, Running while the schedule ticks,
//! GameOver once a spawn finds no room.

use gridfall_core::{ActivePiece, CellEvent, Field, RowList};
use serde::{Deserialize, Serialize};

use crate::apply::merge_piece;
use crate::config::{ConfigError, GameConfig};
use crate::feed::ShapeFeed;
use crate::movement::{try_move, try_spawn};
use crate::scheduler::{Scheduler, TickHandle};
use crate::snapshot::GameSnapshot;

/// A horizontal input, applied at the start of the next tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No schedule armed; waiting for a wake.
    #[default]
    Idle,
    /// Schedule armed, ticking at the configured period.
    Running,
    /// Terminal. The schedule is cancelled and ticks are ignored.
    GameOver,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Tick arrived outside Running - nothing happened.
    Ignored,
    /// The piece moved down one row.
    Moved,
    /// The piece froze; any full rows it touched collapsed.
    Frozen { cleared_rows: RowList },
    /// Freeze followed by a failed spawn - the game is over.
    Toppled,
}

/// Controller-level events for the presentation layer, drained in order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameEvent {
    Cell(CellEvent),
    /// Landed-piece counter after a freeze.
    ScoreChanged(u32),
    Toppled,
}

pub struct Controller<S: Scheduler, F: ShapeFeed> {
    config: GameConfig,
    field: Field,
    piece: Option<ActivePiece>,
    feed: F,
    scheduler: S,
    handle: Option<TickHandle>,
    pending_input: Option<Direction>,
    landed: u32,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl<S: Scheduler, F: ShapeFeed> Controller<S, F> {
    /// Build a game with its first piece already spawned. A grid too small
    /// for the first shape goes straight to GameOver.
    pub fn new(config: GameConfig, scheduler: S, feed: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = Self {
            field: Field::new(config.grid),
            piece: None,
            feed,
            scheduler,
            handle: None,
            pending_input: None,
            landed: 0,
            phase: Phase::Idle,
            events: Vec::new(),
            config,
        };
        if !controller.spawn_piece() {
            controller.phase = Phase::GameOver;
            controller.events.push(GameEvent::Toppled);
        }
        Ok(controller)
    }

    /// Deliver a directional input. Idle: wakes the game. Running: stored
    /// until the next tick, overwriting any unconsumed input. GameOver:
    /// ignored.
    pub fn handle_input(&mut self, dir: Direction) {
        match self.phase {
            Phase::Idle => self.start(),
            Phase::Running => self.pending_input = Some(dir),
            Phase::GameOver => {}
        }
    }

    /// Arm the schedule and begin ticking. No-op unless Idle; GameOver is
    /// terminal.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        let handle = self.scheduler.schedule_repeating(self.config.tick_period_ms);
        self.handle = Some(handle);
        self.phase = Phase::Running;
    }

    /// Cancel the armed schedule and return to Idle. Pending input is
    /// dropped with it.
    pub fn stop(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.cancel_schedule();
        self.pending_input = None;
        self.phase = Phase::Idle;
    }

    /// One step of the game loop. Ticks arriving outside Running are
    /// ignored, so a schedule that fires late cannot mutate state.
    pub fn tick(&mut self) -> StepOutcome {
        if self.phase != Phase::Running {
            return StepOutcome::Ignored;
        }

        // Pending input is consumed whether or not the move lands.
        if let Some(dir) = self.pending_input.take() {
            self.shift_piece(dir.dx(), 0);
        }

        if self.shift_piece(0, 1) {
            return StepOutcome::Moved;
        }
        self.freeze()
    }

    fn shift_piece(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            debug_assert!(false, "no live piece while Running");
            return false;
        };
        let from = piece.cells();
        if !try_move(&self.field, piece, dx, dy) {
            return false;
        }
        let to = piece.cells();
        for (&from, &to) in from.iter().zip(to.iter()) {
            self.events.push(GameEvent::Cell(CellEvent::Moved { from, to }));
        }
        true
    }

    fn freeze(&mut self) -> StepOutcome {
        let Some(piece) = self.piece.take() else {
            debug_assert!(false, "no live piece while Running");
            return StepOutcome::Ignored;
        };

        let merged = merge_piece(&mut self.field, piece);
        self.landed += 1;
        self.events
            .extend(merged.events.iter().copied().map(GameEvent::Cell));
        self.events.push(GameEvent::ScoreChanged(self.landed));

        if self.spawn_piece() {
            StepOutcome::Frozen {
                cleared_rows: merged.cleared_rows,
            }
        } else {
            self.cancel_schedule();
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::Toppled);
            StepOutcome::Toppled
        }
    }

    fn spawn_piece(&mut self) -> bool {
        let shape = self.feed.next_shape();
        match try_spawn(&self.field, shape) {
            Some(piece) => {
                for &cell in &piece.cells() {
                    self.events.push(GameEvent::Cell(CellEvent::Added(cell)));
                }
                self.piece = Some(piece);
                true
            }
            None => {
                self.piece = None;
                false
            }
        }
    }

    fn cancel_schedule(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Landed-piece counter - the score.
    pub fn landed(&self) -> u32 {
        self.landed
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Empty the queued renderer events, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.config.grid,
            landed_cells: self.field.sorted_cells(),
            piece_shape: self.piece.as_ref().map(|piece| piece.shape()),
            piece_cells: self
                .piece
                .as_ref()
                .map(|piece| piece.cells().to_vec())
                .unwrap_or_default(),
            landed_pieces: self.landed,
            phase: self.phase,
        }
    }
}
