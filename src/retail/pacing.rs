use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

/// A pause bounded by `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const ZERO: DelayRange = DelayRange::fixed(Duration::ZERO);

    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn fixed(duration: Duration) -> Self {
        Self {
            min: duration,
            max: duration,
        }
    }

    pub const fn millis(min: u64, max: u64) -> Self {
        Self::new(Duration::from_millis(min), Duration::from_millis(max))
    }

    pub const fn secs(min: u64, max: u64) -> Self {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    /// Uniform sample from the range; `min` when the range is empty or inverted
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let nanos = rng.random_range(self.min.as_nanos()..=self.max.as_nanos());
        Duration::from_nanos(nanos as u64)
    }
}

/// Strategy for the waits between browser actions
#[async_trait]
pub trait Pacing: Send + Sync {
    async fn pause(&self, range: DelayRange);
}

/// Sleeps a random duration in each range to look like a person at the keyboard
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanPacing;

#[async_trait]
impl Pacing for HumanPacing {
    async fn pause(&self, range: DelayRange) {
        let delay = range.sample(&mut rand::rng());
        if delay.is_zero() {
            return;
        }
        debug!(delay_ms = delay.as_millis() as u64, "pausing");
        tokio::time::sleep(delay).await;
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacing for NoPacing {
    async fn pause(&self, _range: DelayRange) {}
}

/// Records each requested range without waiting
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPacing {
    pauses: std::sync::Mutex<Vec<DelayRange>>,
}

#[cfg(test)]
impl RecordingPacing {
    pub fn pauses(&self) -> Vec<DelayRange> {
        self.pauses.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Pacing for RecordingPacing {
    async fn pause(&self, range: DelayRange) {
        self.pauses.lock().unwrap().push(range);
    }
}
