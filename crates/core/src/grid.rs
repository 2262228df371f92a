//! Grid module - the matrix of locked, non-moving cells.
//!
//! A 10x16 grid where each cell is empty or holds a locked piece's color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) with x ranging 0..9 left to right and y ranging 0..15
//! top to bottom. Negative y is the off-screen spawn region above the grid;
//! it is never stored, and queries there report "not occupied".

use arrayvec::ArrayVec;

use blockfall_types::{Cell, Color, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid.
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// The tallest layout spans 4 rows, so a single lock fills at most 4 rows.
pub const MAX_CLEARED_ROWS: usize = 4;

/// The playfield - `GRID_WIDTH` columns x `GRID_HEIGHT` rows, flat row-major.
///
/// Dimensions never change after creation: clearing a row replaces it with a
/// fresh empty row at the top rather than shrinking the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x).
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates.
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get the cell at (x, y). Returns `None` if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether (x, y) holds a locked cell.
    ///
    /// False for any out-of-bounds coordinate, including the spawn region
    /// above row 0, so overlap checks on partially off-screen pieces work
    /// without special cases.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Mark (x, y) occupied with `color`.
    ///
    /// Callers route every write through the collision checks first, so the
    /// coordinate is in bounds by construction; out-of-bounds writes are
    /// ignored.
    pub fn occupy(&mut self, x: i8, y: i8, color: Color) {
        if let Some(idx) = Self::index(x, y) {
            self.cells[idx] = Some(color);
        }
    }

    /// Check if a row is completely filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * GRID_WIDTH as usize;
        let end = start + GRID_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear the row at `y`: shift every row above it down by one and insert
    /// an empty row at the top. Models gravity compaction of a cleared line.
    pub fn clear_row(&mut self, y: usize) {
        if y >= GRID_HEIGHT as usize {
            return;
        }

        let width = GRID_WIDTH as usize;

        // copy_within handles the overlapping ranges safely.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Scan bottom to top, clearing every full row.
    ///
    /// After clearing index `y`, the same index is examined again before the
    /// scan moves upward: the row that just shifted down into `y` may itself
    /// be full. Returns the cleared indices in clearing order (bottom first,
    /// repeats possible when stacked full rows collapse into one index).
    ///
    /// The report caps at [`MAX_CLEARED_ROWS`], the most a single lock can
    /// produce. Hand-built grids with more full rows than that are still
    /// swept completely; only the returned list truncates.
    pub fn sweep_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared = ArrayVec::new();
        let mut y = GRID_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                let _ = cleared.try_push(row);
                // Stay on this index for the next check.
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Count of occupied cells, mostly useful in tests.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::PieceKind;

    fn color() -> Color {
        PieceKind::T.color()
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 15), Some(159));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 16), None);
    }

    #[test]
    fn test_occupy_and_get() {
        let mut grid = Grid::new();

        grid.occupy(5, 10, color());
        assert_eq!(grid.get(5, 10), Some(Some(color())));
        assert!(grid.is_occupied(5, 10));
        assert!(!grid.is_occupied(5, 9));
    }

    #[test]
    fn test_is_occupied_out_of_bounds_is_false() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            for y in 0..GRID_HEIGHT as i8 {
                grid.occupy(x, y, color());
            }
        }

        // Fully packed grid still reports unoccupied outside the matrix,
        // including the off-screen spawn region.
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(GRID_WIDTH as i8, 0));
        assert!(!grid.is_occupied(0, -1));
        assert!(!grid.is_occupied(0, GRID_HEIGHT as i8));
    }

    #[test]
    fn test_occupy_out_of_bounds_is_ignored() {
        let mut grid = Grid::new();
        grid.occupy(-1, 0, color());
        grid.occupy(0, -3, color());
        grid.occupy(GRID_WIDTH as i8, 0, color());
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_is_row_full() {
        let mut grid = Grid::new();
        let y = GRID_HEIGHT as usize - 1;

        for x in 0..GRID_WIDTH as i8 - 1 {
            grid.occupy(x, y as i8, color());
        }
        assert!(!grid.is_row_full(y));

        grid.occupy(GRID_WIDTH as i8 - 1, y as i8, color());
        assert!(grid.is_row_full(y));

        assert!(!grid.is_row_full(GRID_HEIGHT as usize));
    }

    #[test]
    fn test_clear_row_shifts_rows_down_and_inserts_empty_top() {
        let mut grid = Grid::new();
        let bottom = GRID_HEIGHT as i8 - 1;

        // Full bottom row plus a marker cell one row above it.
        for x in 0..GRID_WIDTH as i8 {
            grid.occupy(x, bottom, color());
        }
        let marker = PieceKind::I.color();
        grid.occupy(3, bottom - 1, marker);

        grid.clear_row(bottom as usize);

        // Same height, marker shifted down by one, empty row on top.
        assert_eq!(grid.height(), GRID_HEIGHT);
        assert_eq!(grid.get(3, bottom), Some(Some(marker)));
        assert_eq!(grid.occupied_count(), 1);
        for x in 0..GRID_WIDTH as i8 {
            assert_eq!(grid.get(x, 0), Some(None));
        }
    }

    #[test]
    fn test_sweep_clears_single_full_row() {
        let mut grid = Grid::new();
        let bottom = GRID_HEIGHT as i8 - 1;
        for x in 0..GRID_WIDTH as i8 {
            grid.occupy(x, bottom, color());
        }

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared.as_slice(), &[bottom as usize]);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_sweep_reexamines_same_index_for_stacked_full_rows() {
        let mut grid = Grid::new();
        let bottom = GRID_HEIGHT as i8 - 1;

        // Two stacked full rows. After the bottom one clears, the row that
        // shifts into its index is also full and must be cleared before the
        // scan advances.
        for x in 0..GRID_WIDTH as i8 {
            grid.occupy(x, bottom, color());
            grid.occupy(x, bottom - 1, color());
        }

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared.len(), 2);
        assert_eq!(cleared.as_slice(), &[bottom as usize, bottom as usize]);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_sweep_skips_partial_rows() {
        let mut grid = Grid::new();
        let bottom = GRID_HEIGHT as i8 - 1;

        // Full bottom row, partial row above.
        for x in 0..GRID_WIDTH as i8 {
            grid.occupy(x, bottom, color());
        }
        grid.occupy(0, bottom - 1, color());

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared.as_slice(), &[bottom as usize]);

        // The partial row shifted down into the bottom row.
        assert!(grid.is_occupied(0, bottom));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_sweep_clears_more_rows_than_the_report_holds() {
        let mut grid = Grid::new();
        // Six stacked full rows: two more than the report can carry.
        for y in (GRID_HEIGHT as i8 - 6)..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                grid.occupy(x, y, color());
            }
        }

        let cleared = grid.sweep_full_rows();
        // Every row was swept even though the report truncates.
        assert_eq!(cleared.len(), MAX_CLEARED_ROWS);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_sweep_on_empty_grid_is_noop() {
        let mut grid = Grid::new();
        assert!(grid.sweep_full_rows().is_empty());
        assert_eq!(grid.occupied_count(), 0);
    }
}
