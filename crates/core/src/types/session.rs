//! Session identity as observed by the client services.
//!
//! Authentication itself is owned by an external auth service; the client
//! only ever learns "who is signed in right now", and the cart sync engine
//! uses that to decide whether remote cart I/O is allowed at all.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// The identity attached to the current browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionIdentity {
    /// No signed-in user; the cart is local-only.
    #[default]
    Anonymous,
    /// A signed-in user whose cart is subject to remote synchronization.
    Authenticated {
        /// Opaque user identifier issued by the auth service.
        user_id: UserId,
    },
}

impl SessionIdentity {
    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The signed-in user's ID, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated { user_id } => Some(user_id),
            Self::Anonymous => None,
        }
    }
}
