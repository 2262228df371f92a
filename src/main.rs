//! Terminal blockfall runner.
//!
//! One cooperative loop: render the session, poll input until the next tick
//! is due, feed commands in synchronously, then advance the tick scheduler
//! by the measured elapsed time. The tick interval is re-read every pass so
//! the soft-drop speed boost applies from the next scheduled tick.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Session, TickScheduler};
use blockfall::input::{should_quit, KeyState};
use blockfall::term::{GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut session = Session::new(clock_seed());
    let view = GameView::default();
    let mut keys = KeyState::new();
    let mut scheduler = TickScheduler::new();
    let mut last = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, Viewport::new(w, h));
        term.draw(&fb)?;

        // Poll input until the next tick is due.
        let timeout = Duration::from_millis(u64::from(
            scheduler.timeout_ms(session.frame_interval_ms()),
        ));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(cmd) = keys.on_key_press(key.code) {
                            session.handle(cmd);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(cmd) = keys.on_key_release(key.code) {
                            session.handle(cmd);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Terminals without release events: time out the held soft drop.
        if let Some(cmd) = keys.poll_auto_release() {
            session.handle(cmd);
        }

        let now = Instant::now();
        let elapsed_ms = now.duration_since(last).as_millis() as u32;
        last = now;
        scheduler.advance(elapsed_ms, session.frame_interval_ms(), || {
            session.tick();
        });
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
