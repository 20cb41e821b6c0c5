use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use warden_core::AppResult;
use warden_domain::EventPayload;

/// Port creating subscriptions to a durable event feed.
#[async_trait]
pub trait EventListenerFactory: Send + Sync {
    /// Registers interest in one event type.
    async fn create_listener(&self, event_type: &str) -> AppResult<Box<dyn EventListener>>;
}

/// Subscription delivering untyped event payloads.
#[async_trait]
pub trait EventListener: Send {
    /// Forwards events to `output`, one per message, until the transport
    /// closes or the receiving side of `output` is dropped.
    ///
    /// A message is settled with the transport only after its consumer calls
    /// [`DeliveredEvent::acknowledge`]. Dropping an event unacknowledged leaves
    /// it for redelivery.
    async fn listen(self: Box<Self>, output: mpsc::Sender<DeliveredEvent>) -> AppResult<()>;
}

/// Event payload awaiting acknowledgement from its consumer.
#[derive(Debug)]
pub struct DeliveredEvent {
    payload: EventPayload,
    acknowledgement: oneshot::Sender<()>,
}

impl DeliveredEvent {
    /// Wraps a payload; the receiver resolves once the consumer acknowledges it.
    #[must_use]
    pub fn new(payload: EventPayload) -> (Self, oneshot::Receiver<()>) {
        let (acknowledgement, receiver) = oneshot::channel();
        (
            Self {
                payload,
                acknowledgement,
            },
            receiver,
        )
    }

    /// Returns the untyped payload.
    #[must_use]
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Marks the event as handled, whether it was applied or dropped.
    pub fn acknowledge(self) {
        // The listener may already be gone; the message then stays pending upstream.
        let _ = self.acknowledgement.send(());
    }
}
