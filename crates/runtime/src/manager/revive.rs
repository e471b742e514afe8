/// Countdown until a dead character comes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviveProcess {
    remaining: f32,
    total: f32,
}

impl ReviveProcess {
    /// Starts a full countdown of `seconds`.
    pub fn start(seconds: f32) -> Self {
        let total = seconds.max(0.0);
        Self {
            remaining: total,
            total,
        }
    }

    /// Resumes a countdown that already ran partway.
    pub fn resume(remaining: f32, total: f32) -> Self {
        let total = total.max(0.0);
        Self {
            remaining: remaining.clamp(0.0, total),
            total,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    /// Fraction of the countdown that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total <= 0.0 {
            1.0
        } else {
            1.0 - self.remaining / self.total
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advances by `dt`; returns true once finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_finished()
    }
}
