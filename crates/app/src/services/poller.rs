//! Poller: drives a [`Refresher`] on a fixed interval.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::Refresher;

/// Fixed-interval refresh loop.
///
/// The first refresh is expected to have run during setup, so the loop
/// waits one full interval before its first tick. A tick that overruns the
/// interval delays the next one instead of bursting. Failures are logged and
/// never stop the loop; there is no retry within a tick.
pub struct Poller;

impl Poller {
    /// Spawn the loop. It stops once `shutdown` carries `true` or its sender
    /// is dropped; an in-flight refresh is allowed to complete first.
    pub fn start<R>(
        refresher: R,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()>
    where
        R: Refresher + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            tracing::info!(interval_secs = interval.as_secs(), "poller started");

            loop {
                if *shutdown.borrow_and_update() {
                    break;
                }
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        match refresher.refresh().await {
                            Ok(snapshot) => {
                                tracing::debug!(
                                    sensors = snapshot.values.len(),
                                    "scheduled refresh done"
                                );
                            }
                            Err(err) => {
                                tracing::warn!(
                                    %err,
                                    "scheduled refresh failed, retrying next interval"
                                );
                            }
                        }
                    }
                }
            }

            tracing::info!("poller stopped");
        })
    }
}
