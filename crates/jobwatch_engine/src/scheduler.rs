use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

/// Guards against a zero period from configuration turning into a busy loop.
const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Source of refresh ticks. Injected so tests can drive time by hand.
#[async_trait::async_trait]
pub trait Scheduler: Send {
    /// Resolves at the next tick.
    async fn tick(&mut self);
}

/// Fixed-period ticks on the tokio clock. The first tick fires immediately.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Interval,
}

/// Ticks every `period`, starting now.
pub fn every(period: Duration) -> IntervalScheduler {
    let mut interval = tokio::time::interval(period.max(MIN_PERIOD));
    // A stalled host should not fire a burst of catch-up refreshes.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    IntervalScheduler { interval }
}

#[async_trait::async_trait]
impl Scheduler for IntervalScheduler {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
