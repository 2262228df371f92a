//! Framebuffer: the drawing surface the game renders into.
//!
//! A grid of styled character cells with rectangle fill/stroke and clear
//! primitives. Pure and testable; flushing to a real terminal lives in
//! [`crate::renderer`].

use blockfall_types::Color;

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Color::new(220, 220, 220),
            bg: Color::new(0, 0, 0),
            bold: false,
        }
    }
}

/// A single surface cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D surface of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Full-surface background fill.
    pub fn clear(&mut self, style: CellStyle) {
        self.cells.fill(Cell { ch: ' ', style });
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write a string left to right starting at (x, y). Clips at the edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, ch, style);
        }
    }

    /// Fill a rectangle with a character and style. Out-of-surface parts
    /// clip silently.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Stroke a rectangle outline with box-drawing characters.
    pub fn stroke_rect(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        self.put_char(x, y, '┌', style);
        self.put_char(x + w - 1, y, '┐', style);
        self.put_char(x, y + h - 1, '└', style);
        self.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            self.put_char(x + dx, y, '─', style);
            self.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            self.put_char(x, y + dy, '│', style);
            self.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(bg: Color) -> CellStyle {
        CellStyle {
            bg,
            ..CellStyle::default()
        }
    }

    #[test]
    fn test_new_framebuffer_is_blank() {
        let fb = FrameBuffer::new(8, 4);
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(fb.get(x, y), Some(Cell::default()));
            }
        }
        assert_eq!(fb.get(8, 0), None);
        assert_eq!(fb.get(0, 4), None);
    }

    #[test]
    fn test_fill_rect_covers_exactly_the_rectangle() {
        let mut fb = FrameBuffer::new(10, 6);
        let s = style(Color::new(10, 20, 30));
        fb.fill_rect(2, 1, 3, 2, '#', s);

        let mut painted = 0;
        for y in 0..6 {
            for x in 0..10 {
                let cell = fb.get(x, y).unwrap();
                if cell.ch == '#' {
                    painted += 1;
                    assert!((2..5).contains(&x) && (1..3).contains(&y));
                    assert_eq!(cell.style, s);
                }
            }
        }
        assert_eq!(painted, 6);
    }

    #[test]
    fn test_fill_rect_clips_at_the_edge() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(3, 3, 5, 5, '#', CellStyle::default());
        assert_eq!(fb.get(3, 3).unwrap().ch, '#');
        // No panic, nothing visible beyond the surface.
    }

    #[test]
    fn test_stroke_rect_leaves_interior_untouched() {
        let mut fb = FrameBuffer::new(10, 6);
        fb.stroke_rect(1, 1, 6, 4, CellStyle::default());

        assert_eq!(fb.get(1, 1).unwrap().ch, '┌');
        assert_eq!(fb.get(6, 1).unwrap().ch, '┐');
        assert_eq!(fb.get(1, 4).unwrap().ch, '└');
        assert_eq!(fb.get(6, 4).unwrap().ch, '┘');
        assert_eq!(fb.get(3, 1).unwrap().ch, '─');
        assert_eq!(fb.get(1, 2).unwrap().ch, '│');
        assert_eq!(fb.get(3, 2).unwrap().ch, ' ');
    }

    #[test]
    fn test_clear_repaints_everything() {
        let mut fb = FrameBuffer::new(5, 3);
        fb.put_char(2, 2, 'x', CellStyle::default());
        let bg = style(Color::new(1, 2, 3));
        fb.clear(bg);
        for y in 0..3 {
            for x in 0..5 {
                let cell = fb.get(x, y).unwrap();
                assert_eq!(cell.ch, ' ');
                assert_eq!(cell.style, bg);
            }
        }
    }

    #[test]
    fn test_put_str_writes_and_clips() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.put_str(3, 0, "abc", CellStyle::default());
        assert_eq!(fb.get(3, 0).unwrap().ch, 'a');
        assert_eq!(fb.get(4, 0).unwrap().ch, 'b');
    }
}
