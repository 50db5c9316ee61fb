//! Request pacing. The pipeline calls `pause` once after every upstream request,
//! whether or not the request succeeded.

use std::thread::sleep;
use std::time::Duration;

pub const DEFAULT_PACE: Duration = Duration::from_secs(1);

pub trait Pacing: Send + Sync {
    fn pause(&self);

    /// Nominal wait per request.
    fn delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Blocking fixed sleep (the upstream rate limit).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPacing {
    pub delay: Duration,
}

impl FixedPacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedPacing {
    fn default() -> Self {
        Self { delay: DEFAULT_PACE }
    }
}

impl Pacing for FixedPacing {
    fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay);
        }
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}

/// Zero-delay pacing for tests and local mirrors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn pause(&self) {}
}
