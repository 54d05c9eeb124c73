//! Mobile combatants with per-actor locking.
//!
//! An [`Actor`] is shared between the movement thread, the resolver
//! thread, and the driver through an [`ActorHandle`] (`Arc<Actor>`).
//! Identity (`id`, `kind`, `name`) is immutable and lock-free; position
//! and the alive flag live behind the actor's own `RwLock`, so every
//! read of them is consistent and every transition is ordered per actor.
//!
//! Death is monotonic: once the alive flag is cleared nothing can set it
//! again.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ActorError;
use crate::id::{ActorId, Bounds, Position};
use crate::kind::Kind;

/// Shared, thread-safe handle to an actor.
pub type ActorHandle = Arc<Actor>;

#[derive(Debug)]
struct ActorState {
    position: Position,
    alive: bool,
}

/// A combatant on the map.
#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    kind: Kind,
    name: String,
    state: RwLock<ActorState>,
}

impl Actor {
    /// Create a live actor at `position` with a fresh [`ActorId`].
    pub fn new(kind: Kind, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: ActorId::next(),
            kind,
            name: name.into(),
            state: RwLock::new(ActorState {
                position,
                alive: true,
            }),
        }
    }

    /// Create a live actor and wrap it in a shareable handle.
    pub fn spawn(kind: Kind, name: impl Into<String>, position: Position) -> ActorHandle {
        Arc::new(Self::new(kind, name, position))
    }

    /// Stable identity.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The actor's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.state.read().position
    }

    /// Whether the actor is still alive.
    pub fn is_alive(&self) -> bool {
        self.state.read().alive
    }

    /// Displace the actor by `(dx, dy)`, clamping each axis into `bounds`.
    ///
    /// Returns the new position, or `None` without moving if the actor is
    /// dead.
    pub fn move_by(&self, dx: i32, dy: i32, bounds: Bounds) -> Option<Position> {
        let mut state = self.state.write();
        if !state.alive {
            return None;
        }
        let target = Position::new(
            state.position.x.saturating_add(dx),
            state.position.y.saturating_add(dy),
        );
        state.position = target.clamped(bounds);
        Some(state.position)
    }

    /// Whether `other` is within `distance` of this actor (inclusive).
    ///
    /// Both state locks are taken in ascending [`ActorId`] order, so two
    /// threads calling `a.is_close(b)` and `b.is_close(a)` at the same time
    /// cannot deadlock. Comparing an actor with itself takes one lock.
    pub fn is_close(&self, other: &Actor, distance: u32) -> bool {
        let limit = i64::from(distance) * i64::from(distance);
        if self.id == other.id {
            return true;
        }
        let (first, second) = if self.id < other.id {
            (self, other)
        } else {
            (other, self)
        };
        let a = first.state.read();
        let b = second.state.read();
        a.position.distance_sq(b.position) <= limit
    }

    /// Mark the actor dead.
    ///
    /// Returns `true` if this call performed the alive-to-dead transition,
    /// `false` if the actor was already dead. Duplicate kills are harmless.
    pub fn kill(&self) -> bool {
        let mut state = self.state.write();
        std::mem::replace(&mut state.alive, false)
    }

    /// Set the alive flag.
    ///
    /// Setting `false` always succeeds. Setting `true` on a live actor is a
    /// no-op; on a dead actor it fails with
    /// [`ActorError::InvalidTransition`] and the actor stays dead.
    pub fn set_alive(&self, alive: bool) -> Result<(), ActorError> {
        let mut state = self.state.write();
        if alive && !state.alive {
            return Err(ActorError::InvalidTransition { id: self.id });
        }
        state.alive = alive;
        Ok(())
    }

    /// Point-in-time copy of the actor, taken under a single lock.
    pub fn snapshot(&self) -> ActorSnapshot {
        let state = self.state.read();
        ActorSnapshot {
            id: self.id,
            kind: self.kind,
            name: self.name.clone(),
            position: state.position,
            alive: state.alive,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.position();
        write!(
            f,
            "{}: {{ x:{}, y:{}, name: {} }}",
            self.kind, pos.x, pos.y, self.name
        )
    }
}

/// Plain-data copy of an actor's state for display and persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorSnapshot {
    /// Identity of the actor this was taken from.
    pub id: ActorId,
    /// Kind.
    pub kind: Kind,
    /// Name.
    pub name: String,
    /// Position at the time of the snapshot.
    pub position: Position,
    /// Alive flag at the time of the snapshot.
    pub alive: bool,
}

impl fmt::Display for ActorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.position)?;
        if !self.alive {
            f.write_str(" (dead)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn at(kind: Kind, x: i32, y: i32) -> Actor {
        Actor::new(kind, "t", Position::new(x, y))
    }

    #[test]
    fn creation_keeps_fields() {
        let k = Actor::new(Kind::Melee, "TestKnight", Position::new(100, 200));
        assert_eq!(k.position(), Position::new(100, 200));
        assert_eq!(k.name(), "TestKnight");
        assert_eq!(k.kind(), Kind::Melee);
        assert!(k.is_alive());
    }

    #[test]
    fn is_close_inclusive_boundary() {
        let a = at(Kind::Melee, 0, 0);
        let b = at(Kind::Melee, 3, 4);
        assert!(a.is_close(&b, 5));
        assert!(!a.is_close(&b, 4));
    }

    #[test]
    fn is_close_axis_and_diagonal() {
        let a = at(Kind::Melee, 0, 0);
        let b = at(Kind::Melee, 5, 0);
        assert!(a.is_close(&b, 5));
        assert!(!a.is_close(&b, 4));

        let c = at(Kind::Melee, 30, 40);
        assert!(a.is_close(&c, 50));
        assert!(!a.is_close(&c, 49));
    }

    #[test]
    fn is_close_with_self() {
        let a = at(Kind::Flyer, 7, 7);
        assert!(a.is_close(&a, 0));
    }

    #[test]
    fn move_clamps_at_max_boundary() {
        let bounds = Bounds::new(100, 100);
        let a = at(Kind::Serpent, 100, 100);
        assert_eq!(a.move_by(50, 50, bounds), Some(Position::new(100, 100)));
        assert_eq!(a.move_by(-150, 0, bounds), Some(Position::new(0, 100)));
    }

    #[test]
    fn move_with_negative_literal_bounds_pins_to_zero() {
        let a = at(Kind::Melee, 3, 3);
        let bounds = Bounds { max_x: -1, max_y: 5 };
        assert_eq!(a.move_by(1, 1, bounds), Some(Position::new(0, 4)));
        assert!(a.is_alive());
    }

    #[test]
    fn dead_actor_does_not_move() {
        let a = at(Kind::Flyer, 10, 10);
        assert!(a.kill());
        assert_eq!(a.move_by(5, 5, Bounds::default()), None);
        assert_eq!(a.position(), Position::new(10, 10));
    }

    #[test]
    fn kill_reports_transition_once() {
        let a = at(Kind::Flyer, 0, 0);
        assert!(a.kill());
        assert!(!a.kill());
        assert!(!a.is_alive());
    }

    #[test]
    fn resurrection_is_rejected() {
        let a = at(Kind::Melee, 0, 0);
        a.set_alive(true).unwrap();
        a.set_alive(false).unwrap();
        assert_eq!(
            a.set_alive(true),
            Err(ActorError::InvalidTransition { id: a.id() })
        );
        assert!(!a.is_alive());
    }

    #[test]
    fn snapshot_matches_state() {
        let a = at(Kind::Serpent, 4, 2);
        a.kill();
        let snap = a.snapshot();
        assert_eq!(snap.id, a.id());
        assert_eq!(snap.position, Position::new(4, 2));
        assert!(!snap.alive);
        assert_eq!(snap.to_string(), "t at (4, 2) (dead)");
    }

    #[test]
    fn display_matches_roster_print() {
        let a = Actor::new(Kind::Melee, "K", Position::new(1, 2));
        assert_eq!(a.to_string(), "melee: { x:1, y:2, name: K }");
    }

    #[test]
    fn symmetric_is_close_from_two_threads_does_not_deadlock() {
        let a = Actor::spawn(Kind::Melee, "a", Position::new(0, 0));
        let b = Actor::spawn(Kind::Serpent, "b", Position::new(1, 1));
        let handles: Vec<_> = [(a.clone(), b.clone()), (b, a)]
            .into_iter()
            .map(|(x, y)| {
                thread::spawn(move || {
                    for i in 0..10_000 {
                        assert!(x.is_close(&y, 2));
                        if i % 7 == 0 {
                            x.move_by(0, 0, Bounds::default());
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
