//! Resolver loop: drains the fight queue and applies combat outcomes.
//!
//! Each tick pops a batch of [`FightCandidate`]s under one queue lock,
//! releases the lock, and resolves them in FIFO order:
//!
//! 1. Either side dead: the candidate is stale and discarded.
//! 2. Roll the [`Contest`]. Unless `attack > defense`, nothing happens.
//! 3. Consult [`resolve`]. On [`Outcome::Kills`] the defender dies and
//!    the hub is notified with `won = true`.
//!
//! Only this loop ever kills an actor during a battle, so a defender that
//! was alive at step 1 is still alive at step 3 unless the driver
//! intervened.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use skirmish_core::{resolve, Outcome};

use crate::contest::{Contest, DiceContest};
use crate::hub::{KillEvent, NotificationHub};
use crate::metrics::BattleMetrics;
use crate::queue::{FightCandidate, FightQueue};

/// What happened to one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A participant was already dead when the candidate was popped.
    Stale,
    /// The attacker failed to beat the defender's roll.
    Repelled {
        /// Attacker's roll.
        attack: u32,
        /// Defender's roll.
        defense: u32,
    },
    /// The attacker won the roll but its kind cannot harm the defender.
    Harmless,
    /// The defender died.
    Killed,
}

/// Summary of one resolver tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverTick {
    /// Candidates popped this tick.
    pub resolved: usize,
    /// Of those, how many ended in a kill.
    pub kills: usize,
}

/// The consumer side of the fight queue.
pub struct ResolverLoop<C = DiceContest> {
    queue: Arc<FightQueue>,
    hub: Arc<NotificationHub>,
    metrics: Arc<BattleMetrics>,
    contest: C,
    batch: Option<usize>,
    report_harmless: bool,
    interval: Duration,
}

impl<C: Contest> ResolverLoop<C> {
    /// A resolver over `queue` that reports to `hub` and rolls with
    /// `contest`. Drains everything per tick, at 10 Hz, with fresh metrics.
    pub fn new(queue: Arc<FightQueue>, hub: Arc<NotificationHub>, contest: C) -> Self {
        Self {
            queue,
            hub,
            metrics: Arc::new(BattleMetrics::new()),
            contest,
            batch: None,
            report_harmless: false,
            interval: Duration::from_millis(100),
        }
    }

    /// Share `metrics` instead of the private counters.
    pub fn with_metrics(mut self, metrics: Arc<BattleMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Resolve at most `limit` candidates per tick (`None` for all).
    pub fn with_batch(mut self, limit: Option<usize>) -> Self {
        self.batch = limit;
        self
    }

    /// Also notify with `won = false` when the roll wins but the kind
    /// rule says the attacker is harmless.
    pub fn with_harmless_reports(mut self, enabled: bool) -> Self {
        self.report_harmless = enabled;
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

    /// Resolve a single candidate.
    pub fn resolve_candidate(&mut self, candidate: &FightCandidate) -> Resolution {
        let resolution = self.decide(candidate);
        self.metrics.record_resolution(&resolution);
        resolution
    }

    fn decide(&mut self, candidate: &FightCandidate) -> Resolution {
        let FightCandidate { attacker, defender } = candidate;
        if candidate.is_stale() {
            tracing::debug!(attacker = %attacker.id(), defender = %defender.id(), "stale fight discarded");
            return Resolution::Stale;
        }

        let (attack, defense) = self.contest.roll();
        if attack <= defense {
            return Resolution::Repelled { attack, defense };
        }

        match resolve(attacker.kind(), defender.kind()) {
            Outcome::Harmless => {
                if self.report_harmless {
                    self.hub.notify(&KillEvent::new(attacker, defender, false));
                }
                Resolution::Harmless
            }
            Outcome::Kills => {
                if !attacker.is_alive() || !defender.kill() {
                    return Resolution::Stale;
                }
                tracing::debug!(
                    attacker = attacker.name(),
                    defender = defender.name(),
                    attack,
                    defense,
                    "kill"
                );
                self.hub.notify(&KillEvent::new(attacker, defender, true));
                Resolution::Killed
            }
        }
    }

    /// Drain one batch from the queue and resolve it.
    pub fn tick(&mut self) -> ResolverTick {
        let batch = self.queue.drain(self.batch);
        let mut report = ResolverTick {
            resolved: batch.len(),
            kills: 0,
        };
        for candidate in &batch {
            if self.resolve_candidate(candidate) == Resolution::Killed {
                report.kills += 1;
            }
        }
        self.metrics.record_resolver_tick();
        report
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::{KillSink, SinkError};
    use parking_lot::Mutex;
    use skirmish_core::{Actor, ActorHandle, Kind, Position};
    use std::collections::VecDeque;

    struct Fixed(VecDeque<(u32, u32)>);

    impl Contest for Fixed {
        fn roll(&mut self) -> (u32, u32) {
            self.0.pop_front().unwrap_or((2, 1))
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<KillEvent>>);

    impl KillSink for Collect {
        fn name(&self) -> &str {
            "collect"
        }

        fn on_kill(&self, event: &KillEvent) -> Result<(), SinkError> {
            self.0.lock().push(event.clone());
            Ok(())
        }
    }

    fn setup(rolls: &[(u32, u32)]) -> (ResolverLoop<Fixed>, Arc<FightQueue>, Arc<Collect>) {
        let queue = Arc::new(FightQueue::new());
        let hub = Arc::new(NotificationHub::new());
        let sink = Arc::new(Collect::default());
        hub.subscribe_global(sink.clone());
        let resolver = ResolverLoop::new(
            Arc::clone(&queue),
            hub,
            Fixed(rolls.iter().copied().collect()),
        );
        (resolver, queue, sink)
    }

    fn actor(kind: Kind, name: &str) -> ActorHandle {
        Actor::spawn(kind, name, Position::default())
    }

    #[test]
    fn winning_roll_kills_prey() {
        let (mut r, _q, sink) = setup(&[(6, 1)]);
        let (m, s) = (actor(Kind::Melee, "M"), actor(Kind::Serpent, "S"));
        let res = r.resolve_candidate(&FightCandidate::new(m.clone(), s.clone()));
        assert_eq!(res, Resolution::Killed);
        assert!(!s.is_alive());
        assert!(m.is_alive());
        let events = sink.0.lock();
        assert_eq!(events.len(), 1);
        assert!(events[0].won);
        assert_eq!(events[0].attacker.id, m.id());
    }

    #[test]
    fn tie_goes_to_defender() {
        let (mut r, _q, sink) = setup(&[(3, 3), (1, 5)]);
        let (m, s) = (actor(Kind::Melee, "M"), actor(Kind::Serpent, "S"));
        let c = FightCandidate::new(m, s.clone());
        assert_eq!(
            r.resolve_candidate(&c),
            Resolution::Repelled {
                attack: 3,
                defense: 3
            }
        );
        assert!(matches!(r.resolve_candidate(&c), Resolution::Repelled { .. }));
        assert!(s.is_alive());
        assert!(sink.0.lock().is_empty());
    }

    #[test]
    fn harmless_kind_does_nothing() {
        let (mut r, _q, sink) = setup(&[(6, 1)]);
        let (f, m) = (actor(Kind::Flyer, "F"), actor(Kind::Melee, "M"));
        assert_eq!(
            r.resolve_candidate(&FightCandidate::new(f, m.clone())),
            Resolution::Harmless
        );
        assert!(m.is_alive());
        assert!(sink.0.lock().is_empty());
    }

    #[test]
    fn harmless_reports_when_enabled() {
        let (r, _q, sink) = setup(&[(6, 1)]);
        let mut r = r.with_harmless_reports(true);
        let (f, m) = (actor(Kind::Flyer, "F"), actor(Kind::Melee, "M"));
        r.resolve_candidate(&FightCandidate::new(f, m));
        let events = sink.0.lock();
        assert_eq!(events.len(), 1);
        assert!(!events[0].won);
    }

    #[test]
    fn dead_attacker_is_stale() {
        let (mut r, _q, sink) = setup(&[(6, 1)]);
        let (m, s) = (actor(Kind::Melee, "M"), actor(Kind::Serpent, "S"));
        m.kill();
        assert_eq!(
            r.resolve_candidate(&FightCandidate::new(m, s.clone())),
            Resolution::Stale
        );
        assert!(s.is_alive());
        assert!(sink.0.lock().is_empty());
    }

    #[test]
    fn tick_respects_batch_limit() {
        let (r, q, _sink) = setup(&[]);
        let mut r = r.with_batch(Some(2));
        for i in 0..5 {
            q.push(FightCandidate::new(
                actor(Kind::Flyer, &format!("F{i}")),
                actor(Kind::Flyer, &format!("G{i}")),
            ));
        }
        assert_eq!(r.tick().resolved, 2);
        assert_eq!(q.len(), 3);
        assert_eq!(r.metrics().snapshot().resolver_ticks, 1);
    }

    #[test]
    fn duplicate_candidates_kill_once() {
        let (mut r, q, sink) = setup(&[(6, 1), (6, 1)]);
        let (m, s) = (actor(Kind::Melee, "M"), actor(Kind::Serpent, "S"));
        q.push(FightCandidate::new(m.clone(), s.clone()));
        q.push(FightCandidate::new(m, s));
        let tick = r.tick();
        assert_eq!(tick.resolved, 2);
        assert_eq!(tick.kills, 1);
        assert_eq!(sink.0.lock().len(), 1);
        let snap = r.metrics().snapshot();
        assert_eq!(snap.kills, 1);
        assert_eq!(snap.stale_discarded, 1);
    }

    #[test]
    fn run_stops_on_flag() {
        let (r, _q, _sink) = setup(&[]);
        let mut r = r.with_interval(Duration::from_secs(10));
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            r.run(&flag);
            r.metrics().snapshot().resolver_ticks
        });
        thread::sleep(Duration::from_millis(20));
        stop.store(true, Ordering::Release);
        handle.thread().unpark();
        let ticks = handle.join().unwrap();
        assert!(ticks >= 1);
    }
}
