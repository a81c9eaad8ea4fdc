//! Chat service - 1:1 messaging with in-process thread fan-out
//!
//! Messages are persisted through the message repository and then fanned out
//! to live listeners on the same process. Delivery to listeners is
//! at-least-once for subscribers keeping up with the channel, with no
//! ordering guarantee beyond the store's insertion order; slow listeners may
//! observe gaps. There is no redelivery or read-receipt machinery.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use fanbase_store::{CreateMessage, MessageRepository};
use fanbase_types::{Message, UserId};

use crate::config::ServiceConfig;
use crate::error::{CoreError, CoreResult};
use crate::identity::AuthSession;
use crate::timeout::store_call;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Key identifying the thread between two users regardless of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ThreadKey(Uuid, Uuid);

impl ThreadKey {
    fn new(a: UserId, b: UserId) -> Self {
        if a.0 <= b.0 {
            Self(a.0, b.0)
        } else {
            Self(b.0, a.0)
        }
    }
}

type ThreadRegistry = Arc<DashMap<ThreadKey, broadcast::Sender<Message>>>;

/// Chat service
pub struct ChatService<M> {
    messages: Arc<M>,
    threads: ThreadRegistry,
    capacity: usize,
    config: ServiceConfig,
}

impl<M> ChatService<M>
where
    M: MessageRepository,
{
    /// Create a new chat service
    pub fn new(messages: Arc<M>) -> Self {
        Self::with_config(messages, ServiceConfig::default())
    }

    /// Create with an explicit config
    pub fn with_config(messages: Arc<M>, config: ServiceConfig) -> Self {
        Self {
            messages,
            threads: Arc::new(DashMap::new()),
            capacity: DEFAULT_CHANNEL_CAPACITY,
            config,
        }
    }

    /// Set the per-thread fan-out channel capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Persist a message and fan it out to live listeners on the thread
    pub async fn send_message(
        &self,
        session: &AuthSession,
        receiver_id: UserId,
        body: &str,
    ) -> CoreResult<Message> {
        let body = body.trim();
        if body.is_empty() {
            return Err(CoreError::EmptyMessage);
        }

        let row = store_call(
            self.config.store_timeout,
            self.messages.insert(CreateMessage {
                id: Uuid::new_v4(),
                sender_id: session.user_id.0,
                receiver_id: receiver_id.0,
                body: body.to_string(),
            }),
        )
        .await?;
        let message = row.into_domain();

        let key = ThreadKey::new(session.user_id, receiver_id);
        if let Some(sender) = self.threads.get(&key) {
            // No live listeners is fine; the message is already durable.
            let _ = sender.send(message.clone());
        }

        Ok(message)
    }

    /// Listen for new messages between two users. The returned handle keeps
    /// the listener registered until `close()` or drop.
    pub fn subscribe_to_thread(&self, a: UserId, b: UserId) -> ThreadSubscription {
        let key = ThreadKey::new(a, b);
        let receiver = self
            .threads
            .entry(key)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();

        ThreadSubscription {
            key,
            receiver: Some(receiver),
            threads: Arc::clone(&self.threads),
        }
    }

    /// Message history between two users in insertion order, capped at
    /// `limit`
    pub async fn history(&self, a: UserId, b: UserId, limit: i64) -> CoreResult<Vec<Message>> {
        let rows = store_call(
            self.config.store_timeout,
            self.messages.list_between(a.0, b.0, limit),
        )
        .await?;
        Ok(rows.into_iter().map(|row| row.into_domain()).collect())
    }
}

impl<M> std::fmt::Debug for ChatService<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("threads", &self.threads.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Live listener on a chat thread
///
/// Explicit handle so teardown happens on every exit path: either call
/// [`close`](Self::close) or let the handle drop.
pub struct ThreadSubscription {
    key: ThreadKey,
    receiver: Option<broadcast::Receiver<Message>>,
    threads: ThreadRegistry,
}

impl ThreadSubscription {
    /// Wait for the next message on the thread. Returns `None` once the
    /// subscription is closed. Messages missed while lagging are skipped.
    pub async fn recv(&mut self) -> Option<Message> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "chat listener lagged, skipping messages");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Release the listener. Idempotent; also runs on drop.
    pub fn close(&mut self) {
        if self.receiver.take().is_some() {
            // Drop the registry entry once the last listener is gone so idle
            // threads do not accumulate.
            self.threads
                .remove_if(&self.key, |_, sender| sender.receiver_count() == 0);
        }
    }

    /// Whether the subscription is still receiving
    pub fn is_open(&self) -> bool {
        self.receiver.is_some()
    }
}

impl Drop for ThreadSubscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ThreadSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadSubscription")
            .field("open", &self.is_open())
            .finish()
    }
}
