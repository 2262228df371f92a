//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Enters raw mode plus the alternate screen, and redraws by diffing the
//! previous frame so a steady playfield costs almost nothing per flush.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use blockfall_types::Color;

use crate::fb::{CellStyle, FrameBuffer};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush a frame, diffing against the previously drawn one.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };

        if full {
            self.full_redraw(fb)?;
        } else if let Some(prev) = self.last.take() {
            self.diff_redraw(fb, &prev)?;
        }

        self.last = Some(fb.clone());
        Ok(())
    }

    fn full_redraw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let mut current_style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                if current_style != Some(cell.style) {
                    self.apply_style(cell.style)?;
                    current_style = Some(cell.style);
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.finish_frame()
    }

    fn diff_redraw(&mut self, next: &FrameBuffer, prev: &FrameBuffer) -> Result<()> {
        let mut current_style: Option<CellStyle> = None;

        for y in 0..next.height() {
            let mut x = 0;
            while x < next.width() {
                if next.get(x, y) == prev.get(x, y) {
                    x += 1;
                    continue;
                }

                // One cursor move per contiguous run of changed cells.
                self.stdout.queue(cursor::MoveTo(x, y))?;
                while x < next.width() && next.get(x, y) != prev.get(x, y) {
                    let cell = next.get(x, y).unwrap_or_default();
                    if current_style != Some(cell.style) {
                        self.apply_style(cell.style)?;
                        current_style = Some(cell.style);
                    }
                    self.stdout.queue(Print(cell.ch))?;
                    x += 1;
                }
            }
        }

        self.finish_frame()
    }

    fn finish_frame(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        // Reset first: attribute reset also wipes colors.
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(to_crossterm(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(to_crossterm(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
