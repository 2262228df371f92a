//! Terminal rendering for blockfall.
//!
//! The game draws into a plain framebuffer of styled character cells
//! ([`fb`]), a [`view::GameView`] projects session state into it, and
//! [`renderer::TerminalRenderer`] flushes it to the terminal. The first two
//! are pure and unit-tested; only the renderer touches I/O.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::TerminalRenderer;
pub use view::{GameView, Viewport};
