//! Error types shared across the skirmish workspace.

use thiserror::Error;

use crate::id::ActorId;

/// Errors from decoding an actor [`Kind`](crate::Kind).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KindError {
    /// The numeric code does not name any kind.
    #[error("unknown kind code {code}")]
    UnknownKind {
        /// The unrecognized code.
        code: i64,
    },
    /// The textual label does not name any kind.
    #[error("unknown kind label '{label}'")]
    UnknownLabel {
        /// The unrecognized label.
        label: String,
    },
}

/// Errors from mutating an [`Actor`](crate::Actor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActorError {
    /// Attempted to bring a dead actor back to life.
    #[error("actor {id} is dead and cannot be revived")]
    InvalidTransition {
        /// The dead actor.
        id: ActorId,
    },
}
