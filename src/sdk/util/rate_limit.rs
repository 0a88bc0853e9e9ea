use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::thread;

/// Blocking wrapper around a direct governor limiter.
pub struct Limiter {
    inner: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl Limiter {
    pub fn per_second(max: u32) -> Self {
        Self::with_quota(Quota::per_second(NonZeroU32::new(max).unwrap()))
    }

    pub fn per_minute(max: u32) -> Self {
        Self::with_quota(Quota::per_minute(NonZeroU32::new(max).unwrap()))
    }

    fn with_quota(quota: Quota) -> Self {
        Self {
            inner: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks the calling thread until the next call is within quota.
    pub fn wait(&self) {
        while let Err(not_until) = self.inner.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }
}
