//! Test utilities and fixtures for Skirmish development.
//!
//! Provides deterministic [`Contest`] implementations, a [`RosterBuilder`]
//! for placing actors at exact positions, and recording / failing sinks in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

use skirmish_core::{Actor, ActorHandle, ActorSet, Kind, Position};
use skirmish_engine::Contest;

pub use fixtures::{FailingSink, PanickingSink, RecordingSink};

/// A contest that always returns the same pair.
#[derive(Clone, Copy, Debug)]
pub struct FixedContest {
    pub attack: u32,
    pub defense: u32,
}

impl FixedContest {
    /// Attacker always wins (`6 > 1`).
    pub fn attacker_wins() -> Self {
        Self {
            attack: 6,
            defense: 1,
        }
    }

    /// Defender always holds (`1 < 6`).
    pub fn defender_wins() -> Self {
        Self {
            attack: 1,
            defense: 6,
        }
    }
}

impl Contest for FixedContest {
    fn roll(&mut self) -> (u32, u32) {
        (self.attack, self.defense)
    }
}

/// Replays a fixed script of rolls, then falls back to `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedContest {
    script: VecDeque<(u32, u32)>,
    fallback: (u32, u32),
    rolled: usize,
}

impl ScriptedContest {
    pub fn new(script: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: (1, 1),
            rolled: 0,
        }
    }

    /// Pair returned once the script runs out. Defaults to a tie.
    pub fn then(mut self, fallback: (u32, u32)) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of rolls drawn so far.
    pub fn rolled(&self) -> usize {
        self.rolled
    }
}

impl Contest for ScriptedContest {
    fn roll(&mut self) -> (u32, u32) {
        self.rolled += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

/// Builder for actor sets with hand-placed actors.
///
/// Names default to `"<Kind>_<index>"`.
#[derive(Default)]
pub struct RosterBuilder {
    actors: Vec<ActorHandle>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor and keep building.
    pub fn with(mut self, kind: Kind, x: i32, y: i32) -> Self {
        self.add(kind, x, y);
        self
    }

    /// Add an actor and return its handle.
    pub fn add(&mut self, kind: Kind, x: i32, y: i32) -> ActorHandle {
        let name = format!("{kind}_{}", self.actors.len());
        self.add_named(kind, name, x, y)
    }

    /// Add an actor with an explicit name.
    pub fn add_named(&mut self, kind: Kind, name: impl Into<String>, x: i32, y: i32) -> ActorHandle {
        let actor = Actor::spawn(kind, name, Position::new(x, y));
        self.actors.push(actor.clone());
        actor
    }

    pub fn build(self) -> ActorSet {
        self.actors.into_iter().collect()
    }
}

/// `n` actors cycling through every kind, all stacked on one point.
pub fn crowd(n: usize, at: Position) -> ActorSet {
    let mut builder = RosterBuilder::new();
    for i in 0..n {
        builder.add(Kind::ALL[i % Kind::ALL.len()], at.x, at.y);
    }
    builder.build()
}
