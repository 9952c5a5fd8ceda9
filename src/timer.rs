//! Cancellable, generation-keyed timers.
//!
//! A timer is a spawned task that sleeps and then posts a message back onto
//! the app loop. The message carries the generation the timer was armed
//! with; the receiving component acts on it only if that generation is
//! still current. Re-arming or invalidating a slot bumps the generation and
//! aborts the old task, so a late message from a superseded timer is
//! ignored even if it was already queued.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Monotonically increasing counter used to invalidate stale callbacks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    /// Advance and return the new generation.
    pub fn advance(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }
}

/// Post `message` on `tx` after `delay`.
///
/// A closed channel means the loop has shut down; the message is dropped.
pub fn schedule<T>(tx: &mpsc::UnboundedSender<T>, delay: Duration, message: T) -> JoinHandle<()>
where
    T: Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(message);
    })
}

/// A single re-armable timer with its own generation counter.
#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: Generation,
    handle: Option<JoinHandle<()>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, superseding any pending one.
    ///
    /// `make` receives the new generation and builds the message to post.
    /// Returns the generation the timer was armed with.
    pub fn arm<T, F>(&mut self, tx: &mpsc::UnboundedSender<T>, delay: Duration, make: F) -> u64
    where
        T: Send + 'static,
        F: FnOnce(u64) -> T,
    {
        let generation = self.invalidate();
        self.handle = Some(schedule(tx, delay, make(generation)));
        generation
    }

    /// Disarm any pending timer and advance the generation.
    pub fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation.advance()
    }

    /// Accept a fired timer message.
    ///
    /// Returns true if `generation` is current; the slot is then disarmed.
    pub fn fire(&mut self, generation: u64) -> bool {
        if !self.generation.is_current(generation) {
            return false;
        }
        self.handle = None;
        true
    }

    /// Whether a timer is pending.
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_advances() {
        let mut generation = Generation::default();
        assert!(generation.is_current(0));
        assert_eq!(generation.advance(), 1);
        assert!(generation.is_current(1));
        assert!(!generation.is_current(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_posts_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        schedule(&tx, Duration::from_millis(100), 7u32);

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_aborts_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut slot = TimerSlot::new();

        let first = slot.arm(&tx, Duration::from_millis(100), |g| g);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = slot.arm(&tx, Duration::from_millis(100), |g| g);
        assert_ne!(first, second);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().unwrap(), second);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_rejects_stale_generation() {
        let (tx, _rx) = mpsc::unbounded_channel::<u64>();
        let mut slot = TimerSlot::new();

        let stale = slot.arm(&tx, Duration::from_millis(10), |g| g);
        let current = slot.arm(&tx, Duration::from_millis(10), |g| g);

        assert!(!slot.fire(stale));
        assert!(slot.is_armed());
        assert!(slot.fire(current));
        assert!(!slot.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_disarms() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut slot = TimerSlot::new();

        let armed = slot.arm(&tx, Duration::from_millis(10), |g| g);
        slot.invalidate();
        assert!(!slot.is_armed());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
        assert!(!slot.fire(armed));
    }
}
