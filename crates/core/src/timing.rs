//! Tick scheduling, decoupled from real timers.
//!
//! The runner measures elapsed wall time and feeds it in; tests feed
//! synthetic values and never wait. The interval is passed on every call so
//! a soft-drop speed change takes effect on the next scheduled tick, not
//! retroactively.

/// Accumulates elapsed time and fires a callback once per full interval.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    carry_ms: u32,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds until the next tick is due at the given interval.
    ///
    /// The runner uses this as its input-poll timeout.
    pub fn timeout_ms(&self, interval_ms: u32) -> u32 {
        interval_ms.saturating_sub(self.carry_ms)
    }

    /// Account for `elapsed_ms` of real time, invoking `on_tick` once per
    /// complete `interval_ms`. Fractional remainder carries over.
    ///
    /// Returns the number of ticks fired.
    pub fn advance(
        &mut self,
        elapsed_ms: u32,
        interval_ms: u32,
        mut on_tick: impl FnMut(),
    ) -> u32 {
        if interval_ms == 0 {
            return 0;
        }

        self.carry_ms += elapsed_ms;
        let mut fired = 0;
        while self.carry_ms >= interval_ms {
            self.carry_ms -= interval_ms;
            on_tick();
            fired += 1;
        }
        fired
    }
}
