//! Core game logic - pure, deterministic, and testable.
//!
//! No UI, networking, or I/O here. Same seed, same game; sessions are plain
//! values, so tests run any number of them without timers or terminals.
//!
//! # Module structure
//!
//! - [`grid`]: the 10x16 playfield of locked cells with row clearing
//! - [`piece`]: layouts, rotation, collision checks, locking
//! - [`rng`]: seeded LCG and the 7-bag piece queue
//! - [`session`]: one game instance and its per-tick state machine
//! - [`timing`]: tick scheduling driven by elapsed milliseconds
//!
//! # Rules
//!
//! - A piece spawns at a uniform random column, fully above the visible
//!   grid, and falls one row per tick.
//! - Rotation is a plain 90 degree clockwise transform probed in place; no
//!   wall kicks, and the origin never moves.
//! - A blocked downward move locks the piece, except when it happens while
//!   the piece is still above the grid and overlapping the stack - that
//!   tops the session out and the piece is discarded untransferred.
//! - Full rows are swept bottom to top after every tick, re-examining an
//!   index after each clear so stacked full rows collapse in one sweep.
//! - Illegal moves and rotations are silently rejected; there is no error
//!   taxonomy in the core.

pub mod grid;
pub mod piece;
pub mod rng;
pub mod session;
pub mod timing;

pub use grid::{Grid, MAX_CLEARED_ROWS};
pub use piece::{catalog_layout, Layout, Piece};
pub use rng::{PieceQueue, SimpleRng};
pub use session::Session;
pub use timing::TickScheduler;
