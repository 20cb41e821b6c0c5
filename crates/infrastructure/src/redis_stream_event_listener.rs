//! Redis Streams transport for integration events.
//!
//! Each event type maps to one stream. Listeners join a consumer group, so
//! several workers share the feed. An entry is acknowledged only after the
//! consumer has finished with it; entries left pending by a stopped worker are
//! reclaimed by the others once they have been idle long enough.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use redis::streams::{
    StreamAutoClaimOptions, StreamAutoClaimReply, StreamId, StreamReadOptions, StreamReadReply,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use warden_application::{DeliveredEvent, EventListener, EventListenerFactory};
use warden_core::{AppError, AppResult};
use warden_domain::EventPayload;

const PAYLOAD_FIELD: &str = "payload";
const PENDING_CURSOR: &str = "0";
const NEW_ENTRIES_CURSOR: &str = ">";
const CLAIM_SCAN_START: &str = "0-0";

/// Consumer-group settings shared by every listener a factory creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisStreamSettings {
    /// Prefix for stream keys; the event type is appended after a colon.
    pub stream_prefix: String,
    /// Consumer group shared by all workers.
    pub consumer_group: String,
    /// Unique name of this consumer within the group.
    pub consumer_name: String,
    /// How long one read blocks waiting for entries.
    pub block: Duration,
    /// Maximum entries fetched per read.
    pub batch_size: usize,
    /// How long an entry must sit unacknowledged before another consumer may claim it.
    pub claim_idle: Duration,
}

impl RedisStreamSettings {
    /// Returns the stream key for an event type.
    #[must_use]
    pub fn stream_key(&self, event_type: &str) -> String {
        format!("{}:{event_type}", self.stream_prefix)
    }
}

/// Redis implementation of the event listener factory port.
#[derive(Clone)]
pub struct RedisStreamEventListenerFactory {
    client: redis::Client,
    settings: RedisStreamSettings,
}

impl RedisStreamEventListenerFactory {
    /// Creates a factory with a configured Redis client.
    #[must_use]
    pub fn new(client: redis::Client, settings: RedisStreamSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl EventListenerFactory for RedisStreamEventListenerFactory {
    async fn create_listener(&self, event_type: &str) -> AppResult<Box<dyn EventListener>> {
        let stream_key = self.settings.stream_key(event_type);
        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))?;

        let created: redis::RedisResult<()> = connection
            .xgroup_create_mkstream(&stream_key, &self.settings.consumer_group, "0")
            .await;
        match created {
            Ok(()) => info!(
                stream = %stream_key,
                group = %self.settings.consumer_group,
                "created consumer group"
            ),
            Err(error) if error.code() == Some("BUSYGROUP") => {}
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to create consumer group '{}' on '{stream_key}': {error}",
                    self.settings.consumer_group
                )));
            }
        }

        Ok(Box::new(RedisStreamEventListener {
            connection,
            stream_key,
            settings: self.settings.clone(),
            claim_cursor: CLAIM_SCAN_START.to_owned(),
        }))
    }
}

struct RedisStreamEventListener {
    connection: MultiplexedConnection,
    stream_key: String,
    settings: RedisStreamSettings,
    claim_cursor: String,
}

#[async_trait]
impl EventListener for RedisStreamEventListener {
    async fn listen(mut self: Box<Self>, output: mpsc::Sender<DeliveredEvent>) -> AppResult<()> {
        // Entries delivered to this consumer but never acknowledged come first.
        let mut cursor = PENDING_CURSOR;

        while !output.is_closed() {
            let batch = if cursor == PENDING_CURSOR {
                self.read(PENDING_CURSOR).await
            } else {
                self.next_batch().await
            };
            let entries = match batch {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(stream = %self.stream_key, error = %error, "stream read failed");
                    tokio::time::sleep(self.settings.block).await;
                    continue;
                }
            };

            if entries.is_empty() {
                cursor = NEW_ENTRIES_CURSOR;
                continue;
            }

            for entry in entries {
                if !self.deliver(&output, &entry).await {
                    debug!(stream = %self.stream_key, "consumer stopped before acknowledging");
                    return Ok(());
                }
            }
        }

        debug!(stream = %self.stream_key, "listener output closed");
        Ok(())
    }
}

impl RedisStreamEventListener {
    /// Claims entries abandoned by other consumers, then reads new ones.
    async fn next_batch(&mut self) -> AppResult<Vec<StreamId>> {
        let claimed = self.claim_idle().await?;
        if !claimed.is_empty() {
            return Ok(claimed);
        }

        self.read(NEW_ENTRIES_CURSOR).await
    }

    async fn read(&mut self, cursor: &str) -> AppResult<Vec<StreamId>> {
        let mut options = StreamReadOptions::default()
            .group(&self.settings.consumer_group, &self.settings.consumer_name)
            .count(self.settings.batch_size);
        if cursor == NEW_ENTRIES_CURSOR {
            options = options.block(block_millis(self.settings.block));
        }

        let reply: Option<StreamReadReply> = self
            .connection
            .xread_options(&[self.stream_key.as_str()], &[cursor], &options)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read stream: {error}")))?;

        Ok(reply
            .map(|reply| reply.keys.into_iter().flat_map(|key| key.ids).collect())
            .unwrap_or_default())
    }

    async fn claim_idle(&mut self) -> AppResult<Vec<StreamId>> {
        let options = StreamAutoClaimOptions::default().count(self.settings.batch_size);
        let reply: StreamAutoClaimReply = self
            .connection
            .xautoclaim_options(
                &self.stream_key,
                &self.settings.consumer_group,
                &self.settings.consumer_name,
                block_millis(self.settings.claim_idle),
                self.claim_cursor.as_str(),
                options,
            )
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to claim idle entries: {error}"))
            })?;

        self.claim_cursor = reply.next_stream_id;
        if !reply.claimed.is_empty() {
            info!(
                stream = %self.stream_key,
                count = reply.claimed.len(),
                "claimed idle entries"
            );
        }

        Ok(reply.claimed)
    }

    /// Hands one entry to the consumer and acknowledges it once handled.
    ///
    /// Returns `false` when the consumer has gone away; the entry then stays
    /// pending for redelivery.
    async fn deliver(&mut self, output: &mpsc::Sender<DeliveredEvent>, entry: &StreamId) -> bool {
        if let Some(payload) = decode_entry(&self.stream_key, entry) {
            let (event, acknowledgement) = DeliveredEvent::new(payload);
            if output.send(event).await.is_err() || acknowledgement.await.is_err() {
                return false;
            }
        }

        if let Err(error) = self.acknowledge(&entry.id).await {
            // Left pending; it is claimed again once idle.
            warn!(
                stream = %self.stream_key,
                entry_id = %entry.id,
                error = %error,
                "failed to acknowledge entry"
            );
        }

        true
    }

    async fn acknowledge(&mut self, entry_id: &str) -> AppResult<()> {
        let _: i64 = self
            .connection
            .xack(&self.stream_key, &self.settings.consumer_group, &[entry_id])
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to acknowledge entry '{entry_id}': {error}"))
            })?;

        Ok(())
    }
}

fn block_millis(block: Duration) -> usize {
    usize::try_from(block.as_millis()).unwrap_or(usize::MAX)
}

fn decode_entry(stream_key: &str, entry: &StreamId) -> Option<EventPayload> {
    let Some(raw) = entry.get::<String>(PAYLOAD_FIELD) else {
        warn!(stream = %stream_key, entry_id = %entry.id, "dropping entry without payload");
        return None;
    };

    match serde_json::from_str::<EventPayload>(&raw) {
        Ok(payload) => Some(payload),
        Err(error) => {
            warn!(
                stream = %stream_key,
                entry_id = %entry.id,
                error = %error,
                "dropping entry with undecodable payload"
            );
            None
        }
    }
}
