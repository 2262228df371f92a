//! Shared types and constants for the blockfall workspace.
//!
//! Pure data with no external dependencies. Grid dimensions and the piece
//! catalog are compile-time constants; there is no runtime configuration
//! surface.

/// Playfield dimensions in cells.
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 16;

/// Gravity rates in ticks per second.
///
/// The session runs one gravity step per tick, so fps doubles as the game
/// speed. `SOFT_DROP_FPS` applies while the down key is held.
pub const BASE_FPS: u32 = 4;
pub const SOFT_DROP_FPS: u32 = 20;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A playfield cell: empty or occupied with a locked piece's color.
pub type Cell = Option<Color>;

/// The immutable catalog of seven piece kinds.
///
/// A kind only seeds new pieces (color + initial layout); the active piece
/// owns its own layout copy, so rotation never writes back into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order. Used by the 7-bag randomizer.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// The color locked cells of this kind keep on the grid.
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::new(0, 255, 255),
            PieceKind::O => Color::new(255, 255, 0),
            PieceKind::T => Color::new(170, 0, 255),
            PieceKind::S => Color::new(0, 255, 0),
            PieceKind::Z => Color::new(255, 0, 0),
            PieceKind::J => Color::new(0, 0, 255),
            PieceKind::L => Color::new(255, 85, 0),
        }
    }
}

/// Terminal state of a session. Once `Over`, ticks stop mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Over,
}

/// Commands the input layer feeds into a session.
///
/// Applied synchronously from the event path, independent of tick cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDropPressed,
    SoftDropReleased,
    Pause,
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_seven_distinct_kinds() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in PieceKind::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_kind_colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in PieceKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.color(), b.color());
            }
        }
    }

    #[test]
    fn test_soft_drop_is_faster_than_base() {
        assert!(SOFT_DROP_FPS > BASE_FPS);
    }
}
