//! Piece module - layouts and the active falling piece.
//!
//! A layout is a 2D occupancy mask (up to 4x4) stored as one bitmask per
//! row. The catalog layout of each kind only seeds new pieces; every spawned
//! piece owns its own copy, so rotating the active piece never leaks into
//! the catalog.
//!
//! Collision checking is a pure predicate here. The session decides what a
//! failed downward move means (lock vs. game over); see
//! [`Piece::is_topped_out`].

use blockfall_types::{Color, PieceKind, GRID_HEIGHT, GRID_WIDTH};

use crate::grid::Grid;
use crate::rng::SimpleRng;

/// A piece's occupancy mask. Bit `c` of `rows[r]` is the cell at column `c`
/// of row `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u8,
    height: u8,
    rows: [u8; 4],
}

impl Layout {
    pub const fn new(width: u8, height: u8, rows: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the mask is filled at (row, col).
    #[inline]
    pub fn is_set(&self, row: u8, col: u8) -> bool {
        row < self.height && col < self.width && (self.rows[row as usize] >> col) & 1 == 1
    }

    /// Iterate the filled cells as (col, row) offsets from the origin.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .filter(move |&col| self.is_set(row, col))
                .map(move |col| (col, row))
        })
    }

    /// 90 degree clockwise rotation: transpose, then reverse each row.
    ///
    /// Pure; the receiver is untouched. Four applications return the
    /// original layout.
    pub fn rotated_cw(&self) -> Layout {
        let mut rows = [0u8; 4];
        // rotated[row][col] = self[height - 1 - col][row]
        for row in 0..self.width {
            for col in 0..self.height {
                if self.is_set(self.height - 1 - col, row) {
                    rows[row as usize] |= 1 << col;
                }
            }
        }
        Layout {
            width: self.height,
            height: self.width,
            rows,
        }
    }
}

/// Catalog layout for a piece kind (spawn orientation).
pub fn catalog_layout(kind: PieceKind) -> Layout {
    match kind {
        PieceKind::I => Layout::new(4, 1, [0b1111, 0, 0, 0]),
        PieceKind::O => Layout::new(2, 2, [0b11, 0b11, 0, 0]),
        PieceKind::T => Layout::new(3, 2, [0b111, 0b010, 0, 0]),
        PieceKind::S => Layout::new(3, 2, [0b110, 0b011, 0, 0]),
        PieceKind::Z => Layout::new(3, 2, [0b011, 0b110, 0, 0]),
        PieceKind::J => Layout::new(3, 2, [0b001, 0b111, 0, 0]),
        PieceKind::L => Layout::new(3, 2, [0b100, 0b111, 0, 0]),
    }
}

/// The active falling piece. At most one is alive at a time, owned by the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    layout: Layout,
    /// Grid column of the layout's top-left origin.
    x: i8,
    /// Grid row of the layout's top-left origin. Negative while the piece is
    /// still emerging from above the visible grid.
    y: i8,
}

impl Piece {
    /// Spawn a piece of `kind` at a uniformly random column where the full
    /// layout fits, with the whole layout starting above row 0.
    ///
    /// `y = -layout.height` guarantees no overlap with existing cells at
    /// spawn time while the piece still emerges visually from the top.
    pub fn spawn(kind: PieceKind, rng: &mut SimpleRng) -> Self {
        let layout = catalog_layout(kind);
        let max_x = GRID_WIDTH - layout.width();
        let x = rng.next_range(u32::from(max_x) + 1) as i8;
        let y = -(layout.height() as i8);
        Self { kind, layout, x, y }
    }

    /// Construct at an explicit position. Test scaffolding and the view use
    /// this; gameplay goes through [`Piece::spawn`].
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            layout: catalog_layout(kind),
            x,
            y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Pure collision predicate: would `layout`, placed at the piece's
    /// position offset by (dx, dy), leave the playfield or overlap a locked
    /// cell?
    ///
    /// Passing the piece's own layout tests a real move; passing a candidate
    /// layout probes a rotation without mutating anything. Cells above row 0
    /// only undergo the horizontal checks, since the grid reports the spawn
    /// region as unoccupied.
    pub fn would_collide(&self, grid: &Grid, dx: i8, dy: i8, layout: &Layout) -> bool {
        for (col, row) in layout.cells() {
            let gx = self.x + dx + col as i8;
            let gy = self.y + dy + row as i8;

            if gy >= GRID_HEIGHT as i8 {
                return true;
            }
            if gx < 0 || gx >= GRID_WIDTH as i8 {
                return true;
            }
            if grid.is_occupied(gx, gy) {
                return true;
            }
        }
        false
    }

    /// Real-move-only game-over check: the piece's top is still above the
    /// visible grid and the one-row-down placement overlaps a locked cell.
    ///
    /// Only the gravity path consults this; rotation probes and horizontal
    /// moves never end the game.
    pub fn is_topped_out(&self, grid: &Grid) -> bool {
        if self.y >= 0 {
            return false;
        }
        self.layout.cells().any(|(col, row)| {
            grid.is_occupied(self.x + col as i8, self.y + 1 + row as i8)
        })
    }

    /// Move by (dx, dy) if the destination is free. Illegal moves are
    /// silently rejected.
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        if self.would_collide(grid, dx, dy, &self.layout) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate clockwise if the rotated layout fits at the current origin.
    ///
    /// The candidate layout is probed first; state changes only on success.
    /// The origin never moves (no wall kicks).
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let candidate = self.layout.rotated_cw();
        if self.would_collide(grid, 0, 0, &candidate) {
            return false;
        }
        self.layout = candidate;
        true
    }

    /// Transfer the piece's filled cells into the grid with its color.
    pub fn lock_into(&self, grid: &mut Grid) {
        let color = self.color();
        for (col, row) in self.layout.cells() {
            grid.occupy(self.x + col as i8, self.y + row as i8, color);
        }
    }
}
