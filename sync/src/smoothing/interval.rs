/// Measures elapsed time between successive authoritative updates for one
/// entity. Purely a measurement utility; the result feeds interpolation
/// rates and is never correctness-critical.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalTracker {
    last_observed_ms: Option<u64>,
    last_interval_ms: u64,
}

impl IntervalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an authoritative update at `now_ms` and return the elapsed
    /// interval since the previous one. The first observation has no
    /// baseline and returns 0, which callers must treat as "snap", not
    /// "smooth". Non-monotonic clocks clamp to 0 rather than going
    /// negative.
    pub fn observe(&mut self, now_ms: u64) -> u64 {
        let elapsed = match self.last_observed_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_observed_ms = Some(now_ms);
        self.last_interval_ms = elapsed;
        elapsed
    }

    /// Interval measured by the most recent `observe` call.
    pub fn last_interval_ms(&self) -> u64 {
        self.last_interval_ms
    }
}
