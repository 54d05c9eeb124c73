//! Battle-wide counters shared by the movement and resolver threads.
//!
//! [`BattleMetrics`] is a bag of relaxed atomics written from the loops;
//! [`MetricsSnapshot`] is the plain-data copy handed to callers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters. Every field is cumulative since the battle started.
#[derive(Debug, Default)]
pub struct BattleMetrics {
    movement_ticks: AtomicU64,
    resolver_ticks: AtomicU64,
    candidates_enqueued: AtomicU64,
    candidates_resolved: AtomicU64,
    stale_discarded: AtomicU64,
    repelled: AtomicU64,
    harmless: AtomicU64,
    kills: AtomicU64,
}

impl BattleMetrics {
    /// Fresh zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_movement_tick(&self, enqueued: u64) {
        self.movement_ticks.fetch_add(1, Ordering::Relaxed);
        self.candidates_enqueued.fetch_add(enqueued, Ordering::Relaxed);
    }

    pub(crate) fn record_resolver_tick(&self) {
        self.resolver_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resolution(&self, resolution: &crate::resolver::Resolution) {
        use crate::resolver::Resolution;
        self.candidates_resolved.fetch_add(1, Ordering::Relaxed);
        let counter = match resolution {
            Resolution::Stale => &self.stale_discarded,
            Resolution::Repelled { .. } => &self.repelled,
            Resolution::Harmless => &self.harmless,
            Resolution::Killed => &self.kills,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            movement_ticks: self.movement_ticks.load(Ordering::Relaxed),
            resolver_ticks: self.resolver_ticks.load(Ordering::Relaxed),
            candidates_enqueued: self.candidates_enqueued.load(Ordering::Relaxed),
            candidates_resolved: self.candidates_resolved.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            repelled: self.repelled.load(Ordering::Relaxed),
            harmless: self.harmless.load(Ordering::Relaxed),
            kills: self.kills.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`BattleMetrics`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Completed movement ticks.
    pub movement_ticks: u64,
    /// Completed resolver ticks.
    pub resolver_ticks: u64,
    /// Fight candidates pushed onto the queue.
    pub candidates_enqueued: u64,
    /// Fight candidates popped and resolved (any outcome).
    pub candidates_resolved: u64,
    /// Candidates discarded because a participant was already dead.
    pub stale_discarded: u64,
    /// Contests where the attack roll did not beat the defense roll.
    pub repelled: u64,
    /// Contests won by an attacker whose kind cannot harm the defender.
    pub harmless: u64,
    /// Confirmed kills.
    pub kills: u64,
}
