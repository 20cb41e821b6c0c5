//! Mirrors identity-provider user creation into the local user store.

use tokio::sync::mpsc;
use tracing::{info, warn};
use warden_core::AppResult;
use warden_domain::{EventPayload, UserCreatedEvent};

use crate::{
    CreateUserRequest, CreateUserUseCase, DeliveredEvent, EventListener, EventListenerFactory, UseCase,
};

// Listeners wait for each acknowledgement, so one slot is enough.
const CHANNEL_CAPACITY: usize = 1;

/// Consumes `UserCreatedEvent` payloads and upserts shadow users.
pub struct UserCreatedEventConsumer {
    listener: Box<dyn EventListener>,
    create_user: CreateUserUseCase,
}

impl UserCreatedEventConsumer {
    /// Subscribes to user-created events.
    ///
    /// Fails when the subscription cannot be registered; callers should not
    /// start without it.
    pub async fn new(
        listener_factory: &dyn EventListenerFactory,
        create_user: CreateUserUseCase,
    ) -> AppResult<Self> {
        let listener = listener_factory
            .create_listener(UserCreatedEvent::EVENT_NAME)
            .await?;

        Ok(Self {
            listener,
            create_user,
        })
    }

    /// Processes events one at a time until the listener stops.
    ///
    /// Malformed payloads and failed upserts are logged and dropped. An event is
    /// acknowledged only once its handling has finished, so cancelling this
    /// future mid-event leaves that event for redelivery.
    pub async fn run(self) -> AppResult<()> {
        let (sender, mut receiver) = mpsc::channel::<DeliveredEvent>(CHANNEL_CAPACITY);
        let create_user = self.create_user;

        let consume = async move {
            while let Some(event) = receiver.recv().await {
                handle_payload(&create_user, event.payload()).await;
                event.acknowledge();
            }
        };

        let (listen_result, ()) = tokio::join!(self.listener.listen(sender), consume);
        info!(event = UserCreatedEvent::EVENT_NAME, "event consumer stopped");
        listen_result
    }
}

async fn handle_payload(create_user: &CreateUserUseCase, payload: &EventPayload) {
    let event = match UserCreatedEvent::from_payload(payload) {
        Ok(event) => event,
        Err(error) => {
            warn!(
                event = UserCreatedEvent::EVENT_NAME,
                error = %error,
                "dropping malformed event"
            );
            return;
        }
    };

    let request = CreateUserRequest {
        email: event.email().to_owned(),
        superuser: event.is_superuser(),
    };

    if let Err(error) = create_user.execute(request).await {
        warn!(
            event = UserCreatedEvent::EVENT_NAME,
            email = %event.email(),
            error = %error,
            "failed to handle event"
        );
    }
}
