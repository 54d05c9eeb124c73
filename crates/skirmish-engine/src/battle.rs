//! User-facing `Battle` API and shutdown sequence.
//!
//! A battle runs two background threads over a frozen [`ActorSet`]:
//!
//! ```text
//! Driver (caller)          Movement thread            Resolver thread
//!     |                        |                          |
//!     | Battle::start -------> | move actors              |
//!     |                        | match pairs              |
//!     |                        | queue.push_batch ------> | queue.drain
//!     |                        | park(budget)             | roll + rule
//!     |                        |                          | actor.kill()
//!     |                        |                          | hub.notify
//!     | snapshot()             |                          | park(budget)
//!     |                        |                          |
//!     | shutdown(): set stop, unpark both, join both
//! ```
//!
//! The driver owns the stop flag. Both loops check it every tick and sleep
//! with `park_timeout`, so shutdown latency is one tick body, not one tick
//! interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use skirmish_core::{ActorSet, ActorSnapshot};

use crate::config::{split_seed, BattleConfig, ConfigError};
use crate::contest::DiceContest;
use crate::hub::NotificationHub;
use crate::metrics::{BattleMetrics, MetricsSnapshot};
use crate::movement::MovementLoop;
use crate::queue::FightQueue;
use crate::resolver::ResolverLoop;

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`Battle::shutdown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Wall time spent stopping and joining both threads.
    pub total_ms: u64,
    /// Whether the movement thread exited cleanly.
    pub movement_joined: bool,
    /// Whether the resolver thread exited cleanly.
    pub resolver_joined: bool,
    /// Candidates still queued when the threads stopped. They are
    /// discarded unresolved.
    pub pending_fights: usize,
}

// ── BattleState ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BattleState {
    Running,
    Stopped,
}

// ── Battle ───────────────────────────────────────────────────────

/// A running battle.
///
/// Dropping a `Battle` shuts it down.
pub struct Battle {
    actors: Arc<ActorSet>,
    queue: Arc<FightQueue>,
    hub: Arc<NotificationHub>,
    metrics: Arc<BattleMetrics>,
    stop: Arc<AtomicBool>,
    movement_thread: Option<JoinHandle<()>>,
    resolver_thread: Option<JoinHandle<()>>,
    state: BattleState,
    seed: u64,
}

impl Battle {
    /// Validate `config` and spawn the movement and resolver threads.
    ///
    /// The actor set is frozen for the life of the battle. Sinks must be
    /// registered on `hub` by the caller; registrations made after start
    /// take effect from the next notification.
    pub fn start(
        config: BattleConfig,
        actors: impl Into<Arc<ActorSet>>,
        hub: Arc<NotificationHub>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let actors = actors.into();
        let queue = Arc::new(FightQueue::new());
        let metrics = Arc::new(BattleMetrics::new());
        let stop = Arc::new(AtomicBool::new(false));
        let seed = config.seed.unwrap_or_else(rand::random);
        let (movement_seed, resolver_seed) = split_seed(seed);

        let mut movement =
            MovementLoop::new(Arc::clone(&actors), Arc::clone(&queue), movement_seed)
                .with_profiles(config.profiles)
                .with_bounds(config.bounds)
                .with_metrics(Arc::clone(&metrics))
                .with_interval(config.movement_interval());
        let mut resolver = ResolverLoop::new(
            Arc::clone(&queue),
            Arc::clone(&hub),
            DiceContest::new(config.dice_sides, resolver_seed),
        )
        .with_metrics(Arc::clone(&metrics))
        .with_batch(config.resolve_batch)
        .with_harmless_reports(config.report_harmless)
        .with_interval(config.resolver_interval());

        let movement_stop = Arc::clone(&stop);
        let movement_thread = thread::Builder::new()
            .name("skirmish-movement".into())
            .spawn(move || movement.run(&movement_stop))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("movement thread: {e}"),
            })?;

        let resolver_stop = Arc::clone(&stop);
        let resolver_thread = match thread::Builder::new()
            .name("skirmish-resolver".into())
            .spawn(move || resolver.run(&resolver_stop))
        {
            Ok(handle) => handle,
            Err(e) => {
                stop.store(true, Ordering::Release);
                movement_thread.thread().unpark();
                let _ = movement_thread.join();
                return Err(ConfigError::ThreadSpawnFailed {
                    reason: format!("resolver thread: {e}"),
                });
            }
        };

        tracing::info!(actors = actors.len(), seed, "battle started");

        Ok(Self {
            actors,
            queue,
            hub,
            metrics,
            stop,
            movement_thread: Some(movement_thread),
            resolver_thread: Some(resolver_thread),
            state: BattleState::Running,
            seed,
        })
    }

    /// Per-actor snapshots in roster order. Takes each actor's lock in
    /// turn; never a global lock.
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.actors.snapshot()
    }

    /// Number of actors currently alive.
    pub fn alive_count(&self) -> usize {
        self.actors.alive_count()
    }

    /// The frozen actor set.
    pub fn actors(&self) -> &Arc<ActorSet> {
        &self.actors
    }

    /// The hub kills are reported to.
    pub fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    /// Current counter values.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Fight candidates waiting for the resolver.
    pub fn pending_fights(&self) -> usize {
        self.queue.len()
    }

    /// The base seed actually used (drawn at start when the config had
    /// none).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the background threads are still running.
    pub fn is_running(&self) -> bool {
        self.state == BattleState::Running
    }

    /// Let the battle run for `duration`, calling `on_frame` every
    /// `frame_interval`, then shut it down.
    ///
    /// A zero `frame_interval` calls `on_frame` once, at the end. A
    /// `duration` too large to add to the current instant never elapses.
    pub fn run_for<F>(
        &mut self,
        duration: Duration,
        frame_interval: Duration,
        mut on_frame: F,
    ) -> ShutdownReport
    where
        F: FnMut(&Battle),
    {
        let deadline = deadline_after(duration);
        loop {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => Duration::MAX,
            };
            if remaining.is_zero() {
                break;
            }
            let wait = if frame_interval.is_zero() {
                remaining
            } else {
                frame_interval.min(remaining)
            };
            thread::sleep(wait);
            on_frame(self);
        }
        self.shutdown()
    }

    /// Stop both loops and join their threads.
    ///
    /// 1. Set the stop flag.
    /// 2. Unpark both threads so neither waits out its tick budget.
    /// 3. Join both, then discard whatever is left in the queue.
    ///
    /// Calling this again after the first time returns an empty report.
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.state == BattleState::Stopped {
            return ShutdownReport {
                total_ms: 0,
                movement_joined: true,
                resolver_joined: true,
                pending_fights: 0,
            };
        }

        let start = Instant::now();
        self.stop.store(true, Ordering::Release);
        for handle in [&self.movement_thread, &self.resolver_thread]
            .into_iter()
            .flatten()
        {
            handle.thread().unpark();
        }

        let movement_joined = self
            .movement_thread
            .take()
            .map_or(true, |h| h.join().is_ok());
        let resolver_joined = self
            .resolver_thread
            .take()
            .map_or(true, |h| h.join().is_ok());
        self.state = BattleState::Stopped;

        let pending_fights = self.queue.clear();
        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            movement_joined,
            resolver_joined,
            pending_fights,
        };
        tracing::info!(
            alive = self.alive_count(),
            total_ms = report.total_ms,
            pending = report.pending_fights,
            "battle stopped"
        );
        report
    }
}

impl Drop for Battle {
    fn drop(&mut self) {
        if self.state != BattleState::Stopped {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("actors", &self.actors.len())
            .field("state", &self.state)
            .field("seed", &self.seed)
            .finish()
    }
}

/// `None` when `duration` reaches past the clock's range.
fn deadline_after(duration: Duration) -> Option<Instant> {
    Instant::now().checked_add(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{Actor, Kind, Position};

    fn fast_config() -> BattleConfig {
        BattleConfig {
            movement_rate_hz: 200.0,
            resolver_rate_hz: 200.0,
            seed: Some(5),
            ..BattleConfig::default()
        }
    }

    fn roster(n: usize) -> ActorSet {
        (0..n)
            .map(|i| {
                let kind = Kind::ALL[i % 3];
                Actor::spawn(kind, format!("{kind}_{i}"), Position::new(50, 50))
            })
            .collect()
    }

    #[test]
    fn invalid_config_spawns_nothing() {
        let cfg = BattleConfig {
            dice_sides: 0,
            ..BattleConfig::default()
        };
        let err = Battle::start(cfg, roster(3), Arc::new(NotificationHub::new())).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDiceSides);
    }

    #[test]
    fn unrepresentable_tick_period_is_a_config_error() {
        let cfg = BattleConfig {
            movement_rate_hz: 1e-300,
            ..fast_config()
        };
        let err = Battle::start(cfg, roster(3), Arc::new(NotificationHub::new())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRate { which: "movement", .. }));
    }

    #[test]
    fn start_and_shutdown() {
        let mut battle =
            Battle::start(fast_config(), roster(9), Arc::new(NotificationHub::new())).unwrap();
        assert!(battle.is_running());
        assert_eq!(battle.seed(), 5);
        thread::sleep(Duration::from_millis(50));
        let report = battle.shutdown();
        assert!(report.movement_joined);
        assert!(report.resolver_joined);
        assert!(!battle.is_running());
        assert!(battle.metrics().movement_ticks >= 1);
        assert_eq!(battle.pending_fights(), 0);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut battle =
            Battle::start(fast_config(), roster(3), Arc::new(NotificationHub::new())).unwrap();
        battle.shutdown();
        let second = battle.shutdown();
        assert_eq!(second.total_ms, 0);
        assert_eq!(second.pending_fights, 0);
    }

    #[test]
    fn shutdown_does_not_wait_out_slow_ticks() {
        let cfg = BattleConfig {
            movement_rate_hz: 0.2,
            resolver_rate_hz: 0.2,
            ..fast_config()
        };
        let mut battle = Battle::start(cfg, roster(3), Arc::new(NotificationHub::new())).unwrap();
        thread::sleep(Duration::from_millis(20));
        let started = Instant::now();
        battle.shutdown();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn run_for_calls_frames_then_stops() {
        let mut battle =
            Battle::start(fast_config(), roster(6), Arc::new(NotificationHub::new())).unwrap();
        let mut frames = 0;
        let report = battle.run_for(
            Duration::from_millis(60),
            Duration::from_millis(20),
            |b| {
                assert_eq!(b.snapshot().len(), 6);
                frames += 1;
            },
        );
        assert!(frames >= 3);
        assert!(report.movement_joined && report.resolver_joined);
        assert!(!battle.is_running());
    }

    #[test]
    fn huge_run_length_has_no_deadline() {
        assert!(deadline_after(Duration::MAX).is_none());
        assert!(deadline_after(Duration::from_secs(u64::MAX)).is_none());
        assert!(deadline_after(Duration::from_secs(30)).is_some());
    }

    #[test]
    fn drop_stops_threads() {
        let actors = Arc::new(roster(3));
        let battle =
            Battle::start(fast_config(), Arc::clone(&actors), Arc::new(NotificationHub::new()))
                .unwrap();
        drop(battle);
        assert_eq!(Arc::strong_count(&actors), 1);
    }
}
