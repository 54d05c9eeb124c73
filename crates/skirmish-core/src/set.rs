//! Insertion-ordered actor collection owned by the driver.

use indexmap::IndexMap;

use crate::actor::{Actor, ActorHandle, ActorSnapshot};
use crate::id::{ActorId, Position};
use crate::kind::Kind;

/// The population of a battle.
///
/// Keeps actors in insertion order so snapshots, roster files and pair
/// iteration are stable across runs. Once a battle starts the set is
/// frozen behind an `Arc` and only the actors' own state changes.
#[derive(Clone, Debug, Default)]
pub struct ActorSet {
    actors: IndexMap<ActorId, ActorHandle>,
}

impl ActorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` actors.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actors: IndexMap::with_capacity(capacity),
        }
    }

    /// Add an existing handle. Re-inserting the same actor is a no-op.
    pub fn insert(&mut self, actor: ActorHandle) -> ActorId {
        let id = actor.id();
        self.actors.entry(id).or_insert(actor);
        id
    }

    /// Construct a new live actor and add it.
    pub fn spawn(&mut self, kind: Kind, name: impl Into<String>, position: Position) -> ActorHandle {
        let actor = Actor::spawn(kind, name, position);
        self.insert(actor.clone());
        actor
    }

    /// Look up an actor by id.
    pub fn get(&self, id: ActorId) -> Option<&ActorHandle> {
        self.actors.get(&id)
    }

    /// Actor at insertion index `index`.
    pub fn get_index(&self, index: usize) -> Option<&ActorHandle> {
        self.actors.get_index(index).map(|(_, a)| a)
    }

    /// Number of actors, dead or alive.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the set has no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterate handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorHandle> + '_ {
        self.actors.values()
    }

    /// Number of actors currently alive. Takes each actor's lock in turn.
    pub fn alive_count(&self) -> usize {
        self.iter().filter(|a| a.is_alive()).count()
    }

    /// Snapshot every actor, taking one actor lock at a time.
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.iter().map(|a| a.snapshot()).collect()
    }
}

impl FromIterator<ActorHandle> for ActorSet {
    fn from_iter<I: IntoIterator<Item = ActorHandle>>(iter: I) -> Self {
        let mut set = Self::new();
        for actor in iter {
            set.insert(actor);
        }
        set
    }
}

impl Extend<ActorHandle> for ActorSet {
    fn extend<I: IntoIterator<Item = ActorHandle>>(&mut self, iter: I) {
        for actor in iter {
            self.insert(actor);
        }
    }
}

impl<'a> IntoIterator for &'a ActorSet {
    type Item = &'a ActorHandle;
    type IntoIter = indexmap::map::Values<'a, ActorId, ActorHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.actors.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut set = ActorSet::new();
        let names = ["c", "a", "b"];
        for n in names {
            set.spawn(Kind::Flyer, n, Position::default());
        }
        let got: Vec<_> = set.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(got, names);
        assert_eq!(set.get_index(1).map(|a| a.name()), Some("a"));
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut set = ActorSet::new();
        let a = set.spawn(Kind::Melee, "a", Position::default());
        set.insert(a.clone());
        assert_eq!(set.len(), 1);
        assert!(std::sync::Arc::ptr_eq(set.get(a.id()).unwrap(), &a));
    }

    #[test]
    fn alive_count_tracks_kills() {
        let mut set = ActorSet::new();
        let a = set.spawn(Kind::Melee, "a", Position::default());
        set.spawn(Kind::Serpent, "b", Position::default());
        assert_eq!(set.alive_count(), 2);
        a.kill();
        assert_eq!(set.alive_count(), 1);
        let snaps = set.snapshot();
        assert!(!snaps[0].alive);
        assert!(snaps[1].alive);
    }
}
