//! Chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MessageId, UserId};

/// A 1:1 chat message between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message ID
    pub id: MessageId,
    /// Sending user
    pub sender_id: UserId,
    /// Receiving user
    pub receiver_id: UserId,
    /// Message text
    pub body: String,
    /// When the message was stored
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether this message belongs to the thread between `a` and `b`
    pub fn in_thread(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}
