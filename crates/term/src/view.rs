//! GameView: projects a `Session` into a framebuffer.
//!
//! Pure projection, no game logic: clear, draw every occupied grid cell,
//! then the active piece's cells, mapping grid coordinates to surface
//! coordinates by cell size. Rows still above the grid are clipped.

use blockfall_core::Session;
use blockfall_types::{Color, GameStatus, GRID_HEIGHT, GRID_WIDTH};

use crate::fb::{CellStyle, FrameBuffer};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the playfield centered in the viewport.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render the session into a fresh framebuffer.
    pub fn render(&self, session: &Session, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        let field_w = u16::from(GRID_WIDTH) * self.cell_w;
        let field_h = u16::from(GRID_HEIGHT) * self.cell_h;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        let backdrop = CellStyle {
            fg: Color::new(80, 80, 90),
            bg: Color::new(24, 24, 32),
            bold: false,
        };
        let border = CellStyle {
            fg: Color::new(200, 200, 200),
            bg: Color::new(0, 0, 0),
            bold: false,
        };

        fb.fill_rect(origin_x + 1, origin_y + 1, field_w, field_h, ' ', backdrop);
        fb.stroke_rect(origin_x, origin_y, frame_w, frame_h, border);

        // Locked grid cells.
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                if let Some(Some(color)) = session.grid().get(x, y) {
                    self.fill_grid_cell(&mut fb, origin_x, origin_y, x as u16, y as u16, color);
                }
            }
        }

        // Active piece, clipped to the visible grid.
        if let Some(piece) = session.active() {
            let color = piece.color();
            for (col, row) in piece.layout().cells() {
                let x = piece.x() + col as i8;
                let y = piece.y() + row as i8;
                if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                    self.fill_grid_cell(&mut fb, origin_x, origin_y, x as u16, y as u16, color);
                }
            }
        }

        if session.paused() {
            self.overlay_text(&mut fb, origin_x, origin_y, frame_w, frame_h, "PAUSED");
        } else if session.status() == GameStatus::Over {
            self.overlay_text(&mut fb, origin_x, origin_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    /// Surface rectangle of one grid cell: `origin + 1 + grid * cell_size`
    /// (the +1 skips the border).
    fn fill_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        x: u16,
        y: u16,
        color: Color,
    ) {
        let style = CellStyle {
            fg: color,
            bg: color,
            bold: false,
        };
        fb.fill_rect(
            origin_x + 1 + x * self.cell_w,
            origin_y + 1 + y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ' ',
            style,
        );
    }

    fn overlay_text(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let style = CellStyle {
            fg: Color::new(255, 255, 255),
            bg: Color::new(60, 20, 20),
            bold: true,
        };
        let x = origin_x + frame_w.saturating_sub(text.len() as u16) / 2;
        let y = origin_y + frame_h / 2;
        fb.put_str(x, y, text, style);
    }
}
