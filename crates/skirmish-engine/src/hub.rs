//! Fan-out of combat events to registered sinks.
//!
//! The [`NotificationHub`] holds an ordered list of registrations, each
//! pairing a [`Scope`] with a [`KillSink`]. When the resolver confirms a
//! kill it calls [`notify`](NotificationHub::notify), which invokes every
//! registration whose scope matches, in registration order, on the
//! resolver's own thread.
//!
//! Registrations reference actors by [`ActorId`] only; the hub never keeps
//! an actor alive. The registry lock is released before any sink runs, so
//! a slow sink delays the resolver but never blocks `subscribe`.
//!
//! Sink failures stay inside the hub: an `Err` or a panic from one sink is
//! logged and counted, and the remaining sinks still run.

use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use skirmish_core::{Actor, ActorId, Kind};
use smallvec::SmallVec;
use thiserror::Error;

// ── Events ───────────────────────────────────────────────────────

/// Identity of one side of a fight, detached from the live actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    /// Actor identity.
    pub id: ActorId,
    /// Actor kind.
    pub kind: Kind,
    /// Actor name.
    pub name: String,
}

impl Combatant {
    /// Capture the immutable identity of `actor`. Takes no lock.
    pub fn of(actor: &Actor) -> Self {
        Self {
            id: actor.id(),
            kind: actor.kind(),
            name: actor.name().to_string(),
        }
    }
}

/// A resolved fight, as reported to sinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillEvent {
    /// The attacking side.
    pub attacker: Combatant,
    /// The defending side.
    pub defender: Combatant,
    /// `true` if the defender was killed.
    pub won: bool,
}

impl KillEvent {
    /// Build an event from the two live actors.
    pub fn new(attacker: &Actor, defender: &Actor, won: bool) -> Self {
        Self {
            attacker: Combatant::of(attacker),
            defender: Combatant::of(defender),
            won,
        }
    }
}

impl fmt::Display for KillEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.won { "killed" } else { "failed to kill" };
        write!(f, "{} {verb} {}", self.attacker.name, self.defender.name)
    }
}

// ── Sinks ────────────────────────────────────────────────────────

/// Failure reported by a [`KillSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The receiving end of a channel sink is gone.
    #[error("receiver disconnected")]
    Disconnected,
    /// Any other sink-specific failure.
    #[error("sink failed: {reason}")]
    Failed {
        /// Human-readable description.
        reason: String,
    },
}

/// An observer of combat events.
///
/// Sinks run synchronously on the resolver thread and must be fast. A sink
/// must not mutate actors.
pub trait KillSink: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Handle one event.
    fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError>;
}

// ── Registrations ────────────────────────────────────────────────

/// Which events a registration receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every event.
    Global,
    /// Events where this actor is the attacker.
    Actor(ActorId),
}

impl Scope {
    fn matches(self, event: &KillEvent) -> bool {
        match self {
            Self::Global => true,
            Self::Actor(id) => event.attacker.id == id,
        }
    }
}

struct Registration {
    scope: Scope,
    sink: Arc<dyn KillSink>,
}

/// Ordered registry of sinks.
#[derive(Default)]
pub struct NotificationHub {
    registrations: RwLock<Vec<Registration>>,
    failures: AtomicU64,
}

impl NotificationHub {
    /// Create a hub with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sink` for events matching `scope`.
    pub fn subscribe(&self, scope: Scope, sink: Arc<dyn KillSink>) {
        self.registrations.write().push(Registration { scope, sink });
    }

    /// Register `sink` for every event.
    pub fn subscribe_global(&self, sink: Arc<dyn KillSink>) {
        self.subscribe(Scope::Global, sink);
    }

    /// Register `sink` for events where `actor` attacks.
    pub fn subscribe_actor(&self, actor: &Actor, sink: Arc<dyn KillSink>) {
        self.subscribe(Scope::Actor(actor.id()), sink);
    }

    /// Drop every registration scoped to `id`. Returns how many were removed.
    pub fn unsubscribe_actor(&self, id: ActorId) -> usize {
        let mut regs = self.registrations.write();
        let before = regs.len();
        regs.retain(|r| r.scope != Scope::Actor(id));
        before - regs.len()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// Whether the hub has no registrations.
    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Cumulative number of sink invocations that returned an error or
    /// panicked.
    pub fn sink_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Deliver `event` to every matching sink, in registration order.
    ///
    /// Returns the number of sinks that handled the event successfully.
    /// Failures are logged and counted, never returned.
    pub fn notify(&self, event: &KillEvent) -> usize {
        let targets: SmallVec<[Arc<dyn KillSink>; 4]> = self
            .registrations
            .read()
            .iter()
            .filter(|r| r.scope.matches(event))
            .map(|r| Arc::clone(&r.sink))
            .collect();

        let mut delivered = 0;
        for sink in targets {
            match panic::catch_unwind(AssertUnwindSafe(|| sink.on_kill(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(sink = sink.name(), error = %err, "kill sink failed");
                }
                Err(_) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(sink = sink.name(), "kill sink panicked");
                }
            }
        }
        delivered
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHub")
            .field("registrations", &self.len())
            .field("failures", &self.sink_failures())
            .finish()
    }
}
