//! The dominance relation between kinds.
//!
//! A flat table over the closed [`Kind`] set. The relation is a strict
//! chain, not a cycle:
//!
//! ```text
//! Melee ──kills──> Serpent ──kills──> Flyer ──kills──> (nothing)
//! ```
//!
//! It is irreflexive (no kind kills its own kind) and antisymmetric (if
//! `A` kills `B`, `B` does not kill `A`).

use crate::kind::Kind;

/// Result of applying the dominance relation to one attacker/defender pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The attacker's kind is able to kill the defender's kind.
    Kills,
    /// The attacker's kind cannot harm the defender's kind.
    Harmless,
}

impl Outcome {
    /// Whether this outcome is [`Outcome::Kills`].
    pub fn is_kill(self) -> bool {
        matches!(self, Self::Kills)
    }
}

/// Apply the dominance relation.
pub fn resolve(attacker: Kind, defender: Kind) -> Outcome {
    match (attacker, defender) {
        (Kind::Melee, Kind::Serpent) | (Kind::Serpent, Kind::Flyer) => Outcome::Kills,
        _ => Outcome::Harmless,
    }
}

impl Kind {
    /// Whether this kind can kill `other`.
    pub fn can_kill(self, other: Kind) -> bool {
        resolve(self, other).is_kill()
    }

    /// Kinds this kind can kill.
    pub fn prey(self) -> impl Iterator<Item = Kind> {
        Kind::ALL.into_iter().filter(move |&k| self.can_kill(k))
    }
}
