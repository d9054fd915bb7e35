use crate::foundation::error::{SphereError, SphereResult};

/// Fixed-timestep accumulator.
///
/// Wall-clock deltas accumulate until at least one whole tick interval is
/// owed; [`TickClock::advance`] then returns how many simulation ticks to
/// run. A backlog cap keeps a stalled process from spiraling: excess owed
/// time beyond the cap is dropped, not queued.
pub struct TickClock {
    interval: f32,
    accumulator: f32,
    max_backlog: u32,
}

impl TickClock {
    /// Clock ticking every `interval` seconds, running at most `max_backlog`
    /// catch-up ticks per advance.
    pub fn new(interval: f32, max_backlog: u32) -> SphereResult<Self> {
        if !(interval > 0.0) {
            return Err(SphereError::config("tick interval must be > 0"));
        }
        if max_backlog == 0 {
            return Err(SphereError::config("tick backlog cap must be > 0"));
        }
        Ok(Self { interval, accumulator: 0.0, max_backlog })
    }

    /// Seconds per tick.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Feed `dt` seconds of wall clock; returns the number of ticks to run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        if ticks > self.max_backlog {
            tracing::debug!(owed = ticks, cap = self.max_backlog, "tick backlog capped");
            self.accumulator = 0.0;
            ticks = self.max_backlog;
        }
        ticks
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
