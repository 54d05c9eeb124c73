//! Movement loop: random walk plus proximity matchmaking.
//!
//! Each tick has two phases over the frozen [`ActorSet`]:
//!
//! 1. **Move.** Every alive actor steps `dir * move_distance` on each axis,
//!    with `dir` drawn independently from `{-1, 0, 1}`, clamped into the
//!    map bounds.
//! 2. **Match.** For every ordered pair of distinct alive actors `(a, d)`
//!    where `d` lies within `a`'s kill distance, a [`FightCandidate`] is
//!    pushed. The whole tick's candidates go in under one queue lock.
//!
//! Liveness is re-read per pair, so an actor killed mid-scan may still
//! appear in candidates from this tick. The resolver discards those.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_core::{ActorHandle, ActorSet, Bounds};

use crate::config::KindProfiles;
use crate::metrics::BattleMetrics;
use crate::queue::{FightCandidate, FightQueue};

/// Summary of one movement tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementTick {
    /// Actors that were alive and took a step.
    pub moved: usize,
    /// Candidates pushed onto the fight queue.
    pub enqueued: usize,
}

/// The producer side of the fight queue.
pub struct MovementLoop {
    actors: Arc<ActorSet>,
    queue: Arc<FightQueue>,
    metrics: Arc<BattleMetrics>,
    profiles: KindProfiles,
    bounds: Bounds,
    rng: ChaCha8Rng,
    interval: Duration,
}

impl MovementLoop {
    /// A loop over `actors` feeding `queue`, with default profiles and
    /// bounds, ticking at 10 Hz.
    pub fn new(actors: Arc<ActorSet>, queue: Arc<FightQueue>, seed: u64) -> Self {
        Self {
            actors,
            queue,
            metrics: Arc::new(BattleMetrics::new()),
            profiles: KindProfiles::default(),
            bounds: Bounds::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            interval: Duration::from_millis(100),
        }
    }

    /// Use `profiles` for step and reach distances.
    pub fn with_profiles(mut self, profiles: KindProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    /// Clamp moves into `bounds`.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Share `metrics` instead of the private counters.
    pub fn with_metrics(mut self, metrics: Arc<BattleMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Budget of one tick when running on a thread.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The counters this loop writes to.
    pub fn metrics(&self) -> &Arc<BattleMetrics> {
        &self.metrics
    }

    /// Move every alive actor once, then enqueue every in-range pair.
    pub fn tick(&mut self) -> MovementTick {
        let mut moved = 0;
        for actor in self.actors.iter() {
            let step = i32::try_from(self.profiles.get(actor.kind()).move_distance)
                .unwrap_or(i32::MAX);
            let dx = self.rng.gen_range(-1..=1) * step;
            let dy = self.rng.gen_range(-1..=1) * step;
            if actor.move_by(dx, dy, self.bounds).is_some() {
                moved += 1;
            }
        }

        let alive: Vec<&ActorHandle> = self.actors.iter().filter(|a| a.is_alive()).collect();
        let mut candidates = Vec::new();
        for attacker in &alive {
            let reach = self.profiles.get(attacker.kind()).kill_distance;
            for defender in &alive {
                if attacker.id() != defender.id() && attacker.is_close(defender, reach) {
                    candidates.push(FightCandidate::new(
                        Arc::clone(attacker),
                        Arc::clone(defender),
                    ));
                }
            }
        }

        let enqueued = self.queue.push_batch(candidates);
        self.metrics.record_movement_tick(enqueued as u64);
        MovementTick { moved, enqueued }
    }

    /// Tick until `stop` is set.
    ///
    /// Sleeps with `park_timeout`, so unparking the thread after setting
    /// `stop` ends the loop without waiting out the interval.
    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Acquire) {
            let started = Instant::now();
            self.tick();
            if let Some(remaining) = self.interval.checked_sub(started.elapsed()) {
                thread::park_timeout(remaining);
            }
        }
    }
}
