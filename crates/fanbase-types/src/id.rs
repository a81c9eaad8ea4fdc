//! Identifier newtypes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Unique user identifier
    UserId
);

uuid_id!(
    /// Unique creator identifier
    ///
    /// Creators are users; a creator's id equals their user id, but the two
    /// are kept as distinct types so subscriber and creator arguments cannot
    /// be swapped silently.
    CreatorId
);

uuid_id!(
    /// Unique entitlement identifier
    EntitlementId
);

uuid_id!(
    /// Unique content item identifier
    ContentId
);

uuid_id!(
    /// Unique chat message identifier
    MessageId
);

impl UserId {
    /// View this user as a creator
    pub fn as_creator(&self) -> CreatorId {
        CreatorId(self.0)
    }
}

impl CreatorId {
    /// View this creator as a plain user (e.g. as a chat participant)
    pub fn as_user(&self) -> UserId {
        UserId(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = UserId::new();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UserId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_creator_user_conversion_preserves_uuid() {
        let user = UserId::new();
        assert_eq!(user.as_creator().as_user(), user);
    }
}
