//! Session module - one game instance and its per-tick state machine.
//!
//! A session owns the grid, the active piece, the piece queue and the
//! current speed. Nothing here is global: callers can run any number of
//! sessions side by side, and tests drive ticks directly without timers.
//!
//! One tick: ensure an active piece exists, apply one gravity step (lock or
//! advance), then sweep full rows. Rendering and rescheduling belong to the
//! caller.

use arrayvec::ArrayVec;

use blockfall_types::{GameCommand, GameStatus, BASE_FPS, SOFT_DROP_FPS};

use crate::grid::{Grid, MAX_CLEARED_ROWS};
use crate::piece::Piece;
use crate::rng::{PieceQueue, SimpleRng};

/// A single game session.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    rng: SimpleRng,
    status: GameStatus,
    fps: u32,
    paused: bool,
    seed: u32,
}

impl Session {
    /// Create a session with an empty grid.
    pub fn new(seed: u32) -> Self {
        Self::with_grid(Grid::new(), seed)
    }

    /// Create a session over a prepared grid. This is the deterministic
    /// entry point for tests that need specific stack shapes.
    pub fn with_grid(grid: Grid, seed: u32) -> Self {
        Self {
            grid,
            active: None,
            queue: PieceQueue::new(seed),
            // Offset so piece order and spawn columns do not correlate.
            rng: SimpleRng::new(seed ^ 0x9e37_79b9),
            status: GameStatus::Playing,
            fps: BASE_FPS,
            paused: false,
            seed,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Milliseconds between ticks at the current speed.
    ///
    /// Read fresh at every reschedule, so a soft-drop toggle shows up on the
    /// next scheduled tick.
    pub fn frame_interval_ms(&self) -> u32 {
        1000 / self.fps
    }

    /// Run one tick of the update loop.
    ///
    /// Returns the indices of rows cleared this tick (empty on a halted or
    /// paused session).
    pub fn tick(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        if self.paused || self.status == GameStatus::Over {
            return ArrayVec::new();
        }

        if self.active.is_none() {
            let kind = self.queue.draw();
            self.active = Some(Piece::spawn(kind, &mut self.rng));
        }

        self.apply_gravity();
        if self.status == GameStatus::Over {
            // Terminal state: the grid must not mutate past this point.
            return ArrayVec::new();
        }
        self.grid.sweep_full_rows()
    }

    /// One gravity step: advance the piece a row, or resolve the blocked
    /// move as a lock or a top-out.
    fn apply_gravity(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };

        if piece.would_collide(&self.grid, 0, 1, piece.layout()) {
            if piece.is_topped_out(&self.grid) {
                // Blocked by the stack while still above the visible grid:
                // the piece is discarded without locking and the session
                // halts.
                self.status = GameStatus::Over;
            } else {
                piece.lock_into(&mut self.grid);
            }
            // Either way the active slot empties; the next tick spawns.
        } else {
            piece.try_move(&self.grid, 0, 1);
            self.active = Some(piece);
        }
    }

    /// Apply a player command, synchronously.
    ///
    /// Piece commands are ignored while paused, after game over, or when no
    /// piece is active. Returns whether the command changed anything.
    pub fn handle(&mut self, cmd: GameCommand) -> bool {
        match cmd {
            GameCommand::Pause => {
                if self.status == GameStatus::Over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameCommand::Restart => {
                *self = Self::new(self.seed);
                true
            }
            GameCommand::SoftDropReleased => {
                // Always applies, so the boost cannot stick when the piece
                // locks while the key is down.
                let changed = self.fps != BASE_FPS;
                self.fps = BASE_FPS;
                changed
            }
            GameCommand::SoftDropPressed => {
                if !self.accepts_piece_commands() {
                    return false;
                }
                self.fps = SOFT_DROP_FPS;
                true
            }
            GameCommand::MoveLeft => self.move_active(-1),
            GameCommand::MoveRight => self.move_active(1),
            GameCommand::Rotate => {
                if !self.accepts_piece_commands() {
                    return false;
                }
                match self.active.as_mut() {
                    Some(piece) => piece.try_rotate(&self.grid),
                    None => false,
                }
            }
        }
    }

    fn accepts_piece_commands(&self) -> bool {
        !self.paused && self.status == GameStatus::Playing && self.active.is_some()
    }

    fn move_active(&mut self, dx: i8) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.try_move(&self.grid, dx, 0),
            None => false,
        }
    }
}
