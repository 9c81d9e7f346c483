//! Timer capability.

use std::future::poll_fn;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_core::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Unbounded stream of timer ticks.
pub type Ticks = Pin<Box<dyn Stream<Item = ()> + Send>>;

/// Source of periodic ticks.
pub trait Clock: Send + Sync + 'static {
    /// Start a timer. The first tick arrives one `interval` after the call.
    fn timer(&self, interval: Duration) -> Ticks;
}

/// Await the next tick. `None` means the clock went away.
pub async fn next_tick(ticks: &mut Ticks) -> Option<()> {
    poll_fn(|cx| ticks.as_mut().poll_next(cx)).await
}

/// Wall clock backed by `tokio::time`.
#[derive(Debug, Clone, Default)]
pub struct TokioClock;

struct IntervalTicks(Interval);

impl Stream for IntervalTicks {
    type Item = ();

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        self.0.poll_tick(cx).map(|_| Some(()))
    }
}

impl Clock for TokioClock {
    fn timer(&self, interval: Duration) -> Ticks {
        let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Box::pin(IntervalTicks(timer))
    }
}

/// Clock that only ticks when told to.
#[derive(Clone, Default)]
pub struct ManualClock {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<()>>>>,
}

struct ChannelTicks(mpsc::UnboundedReceiver<()>);

impl Stream for ChannelTicks {
    type Item = ();

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        self.0.poll_recv(cx)
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick to every running timer. Returns how many received it.
    pub fn tick(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(()).is_ok());
        subscribers.len()
    }

    /// Number of timers still listening.
    pub fn active_timers(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

impl Clock for ManualClock {
    fn timer(&self, _interval: Duration) -> Ticks {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        Box::pin(ChannelTicks(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_first_tick_after_one_interval() {
        let start = Instant::now();
        let mut ticks = TokioClock.timer(Duration::from_millis(250));
        next_tick(&mut ticks).await;
        let first = start.elapsed();
        assert!(first >= Duration::from_millis(250) && first < Duration::from_millis(500));
        next_tick(&mut ticks).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn manual_clock_ticks_on_demand() {
        let clock = ManualClock::new();
        let mut ticks = clock.timer(Duration::from_secs(1));
        assert_eq!(clock.tick(), 1);
        assert_eq!(next_tick(&mut ticks).await, Some(()));
        drop(ticks);
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(clock.tick(), 0);
    }
}
