//! Polling connectivity monitor.
//!
//! Runs a [`ConnectivityProbe`] on an interval and posts only genuine
//! status transitions to the app loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::filter::StatusFilter;
use crate::app::AppMessage;
use crate::traits::ConnectivityProbe;

/// Spawn the monitor task.
///
/// The first probe runs immediately. The task stops when the app loop
/// drops its receiver; abort the handle to stop it earlier.
pub fn spawn_monitor(
    probe: Arc<dyn ConnectivityProbe>,
    interval: Duration,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Connectivity monitor started (interval: {:?})", interval);

        let mut filter = StatusFilter::new();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let status = probe.probe().await;
            let Some(status) = filter.observe(status) else {
                tracing::trace!("Connectivity unchanged");
                continue;
            };

            tracing::debug!(?status, "Connectivity status changed");
            if message_tx
                .send(AppMessage::ConnectivityChanged(status))
                .is_err()
            {
                tracing::debug!("Message channel closed, stopping connectivity monitor");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::ScriptedProbe;
    use crate::domain::ConnectivityStatus::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_transitions_are_posted() {
        let probe = ScriptedProbe::new(vec![
            Satisfied,
            Satisfied,
            Unsatisfied,
            Unsatisfied,
            Satisfied,
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_monitor(Arc::new(probe.clone()), Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(5500)).await;
        handle.abort();

        let mut posted = Vec::new();
        while let Ok(AppMessage::ConnectivityChanged(status)) = rx.try_recv() {
            posted.push(status);
        }
        assert_eq!(posted, vec![Satisfied, Unsatisfied, Satisfied]);
        assert!(probe.calls() >= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let probe = ScriptedProbe::new(vec![Satisfied, Unsatisfied]);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let handle = spawn_monitor(Arc::new(probe), Duration::from_millis(10), tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor should stop")
            .unwrap();
    }
}
