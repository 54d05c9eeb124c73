//! Concurrent battle engine for the skirmish simulation.
//!
//! Runs a [`MovementLoop`] and a [`ResolverLoop`] on background threads,
//! connected by a [`FightQueue`], and reports kills through a
//! [`NotificationHub`]. [`Battle`] is the driver-facing entry point: it
//! owns the stop flag and both thread handles.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod battle;
pub mod config;
pub mod contest;
pub mod hub;
pub mod metrics;
pub mod movement;
pub mod queue;
pub mod resolver;
pub mod sinks;

pub use battle::{Battle, ShutdownReport};
pub use config::{BattleConfig, ConfigError, KindProfile, KindProfiles};
pub use contest::{Contest, DiceContest};
pub use hub::{Combatant, KillEvent, KillSink, NotificationHub, Scope, SinkError};
pub use metrics::{BattleMetrics, MetricsSnapshot};
pub use movement::{MovementLoop, MovementTick};
pub use queue::{FightCandidate, FightQueue};
pub use resolver::{Resolution, ResolverLoop, ResolverTick};
pub use sinks::{ChannelSink, ConsoleSink, TracingSink, WriterSink};
