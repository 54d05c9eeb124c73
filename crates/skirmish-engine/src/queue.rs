//! Unbounded FIFO of fight candidates between the two loops.
//!
//! [`FightQueue`] is the only structure in the engine guarded by a
//! dedicated lock beyond the per-actor locks. Producers (the movement
//! loop) push; the consumer (the resolver loop) drains in batches. The
//! queue is unbounded: a push never fails and never drops a candidate.
//!
//! # Ordering
//!
//! Candidates come out in exactly the order they went in. Nothing else is
//! promised: a candidate can go stale between push and pop, and the
//! resolver is expected to check.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;
use skirmish_core::ActorHandle;

/// A proposal that `attacker` and `defender` are close enough to fight.
#[derive(Clone)]
pub struct FightCandidate {
    /// The actor whose engagement radius triggered the candidate.
    pub attacker: ActorHandle,
    /// The actor inside that radius.
    pub defender: ActorHandle,
}

impl FightCandidate {
    /// Pair two actors.
    pub fn new(attacker: ActorHandle, defender: ActorHandle) -> Self {
        Self { attacker, defender }
    }

    /// Whether either participant has died since the candidate was made.
    pub fn is_stale(&self) -> bool {
        !self.attacker.is_alive() || !self.defender.is_alive()
    }
}

impl fmt::Debug for FightCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FightCandidate")
            .field("attacker", &self.attacker.id())
            .field("defender", &self.defender.id())
            .finish()
    }
}

/// Thread-safe FIFO of [`FightCandidate`]s.
#[derive(Debug, Default)]
pub struct FightQueue {
    queue: Mutex<VecDeque<FightCandidate>>,
}

impl FightQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one candidate.
    pub fn push(&self, candidate: FightCandidate) {
        self.queue.lock().push_back(candidate);
    }

    /// Append many candidates under a single lock acquisition, preserving
    /// their order.
    pub fn push_batch<I>(&self, candidates: I) -> usize
    where
        I: IntoIterator<Item = FightCandidate>,
    {
        let mut queue = self.queue.lock();
        let before = queue.len();
        queue.extend(candidates);
        queue.len() - before
    }

    /// Pop the oldest candidate.
    pub fn pop(&self) -> Option<FightCandidate> {
        self.queue.lock().pop_front()
    }

    /// Pop up to `limit` candidates (all of them for `None`) under one lock
    /// acquisition. The lock is released before the caller resolves them.
    pub fn drain(&self, limit: Option<usize>) -> Vec<FightCandidate> {
        let mut queue = self.queue.lock();
        let n = limit.map_or(queue.len(), |l| l.min(queue.len()));
        queue.drain(..n).collect()
    }

    /// Number of queued candidates.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Discard all pending candidates, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut queue = self.queue.lock();
        let n = queue.len();
        queue.clear();
        n
    }
}
