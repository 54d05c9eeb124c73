//! Skirmish: a concurrent combat simulation.
//!
//! Actors of three kinds wander a bounded map on one thread while a second
//! thread resolves the fights their proximity produces. Kills are reported
//! to pluggable sinks.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Skirmish sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use skirmish::prelude::*;
//!
//! let actors = skirmish::roster::seeded_roster(20, Bounds::default(), 7);
//! let hub = Arc::new(NotificationHub::new());
//! let (sink, kills) = ChannelSink::unbounded();
//! hub.subscribe_global(Arc::new(sink));
//!
//! let config = BattleConfig { seed: Some(7), ..BattleConfig::default() };
//! let mut battle = Battle::start(config, actors, hub).unwrap();
//! let report = battle.run_for(Duration::from_millis(50), Duration::ZERO, |_| {});
//! assert!(report.movement_joined && report.resolver_joined);
//! assert_eq!(kills.try_iter().count(), 20 - battle.alive_count());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `skirmish-core` | Actors, kinds, geometry, the dominance rule |
//! | [`engine`] | `skirmish-engine` | Battle threads, fight queue, notification hub |
//! | [`roster`] | `skirmish-roster` | Roster save/load and random seeding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Actors, kinds, geometry and the combat rule (`skirmish-core`).
pub use skirmish_core as model;

/// Battle threads, queue, hub and sinks (`skirmish-engine`).
///
/// [`engine::Battle`] runs both loops in the background;
/// [`engine::MovementLoop`] and [`engine::ResolverLoop`] can also be
/// ticked by hand.
pub use skirmish_engine as engine;

/// Roster persistence and seeding (`skirmish-roster`).
pub use skirmish_roster as roster;

/// Common imports for typical Skirmish usage.
///
/// ```rust
/// use skirmish::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use skirmish_core::{
        resolve, Actor, ActorHandle, ActorId, ActorSet, ActorSnapshot, Bounds, Kind, Outcome,
        Position,
    };

    // Errors
    pub use skirmish_core::{ActorError, KindError};
    pub use skirmish_engine::{ConfigError, SinkError};
    pub use skirmish_roster::RosterError;

    // Engine
    pub use skirmish_engine::{
        Battle, BattleConfig, KillEvent, KillSink, KindProfile, KindProfiles, MetricsSnapshot,
        NotificationHub, Scope, ShutdownReport,
    };

    // Sinks
    pub use skirmish_engine::{ChannelSink, ConsoleSink, TracingSink, WriterSink};
}
