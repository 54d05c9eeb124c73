//! Core types for the skirmish combat simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! actor model shared by every other crate in the workspace: identities and
//! geometry, the closed [`Kind`] set, the thread-safe [`Actor`] record, the
//! kind-vs-kind dominance rule, and the driver-owned [`ActorSet`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod error;
pub mod id;
pub mod kind;
pub mod rule;
pub mod set;

pub use actor::{Actor, ActorHandle, ActorSnapshot};
pub use error::{ActorError, KindError};
pub use id::{ActorId, Bounds, Position};
pub use kind::Kind;
pub use rule::{resolve, Outcome};
pub use set::ActorSet;
