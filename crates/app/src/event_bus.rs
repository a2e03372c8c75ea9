//! Fan-out of coordinator events to every live subscriber.

use std::future::Future;

use tokio::sync::broadcast;

use vcontrol_domain::error::VControlError;
use vcontrol_domain::event::Event;

use crate::ports::EventPublisher;

/// Broadcasts events to SSE streams and any other in-process observer.
///
/// Subscribers only see events published after they subscribed. A
/// subscriber that falls more than `capacity` events behind skips the
/// oldest ones and is told how many it missed.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), VControlError>> + Send {
        let event_type = event.event_type.as_str();
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(event_type, receivers, "event published"),
            Err(_) => tracing::trace!(event_type, "event dropped, no subscribers"),
        }
        async { Ok(()) }
    }
}
