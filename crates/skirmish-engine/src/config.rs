//! Battle configuration, validation, and error types.
//!
//! [`BattleConfig`] is the builder-input for [`Battle::start`](crate::Battle::start).
//! [`validate()`](BattleConfig::validate) checks every structural invariant
//! before any thread is spawned.

use std::time::Duration;

use skirmish_core::{Bounds, Kind};
use thiserror::Error;

// ── KindProfile ─────────────────────────────────────────────────────

/// Movement and engagement distances for one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindProfile {
    /// Step length of the random walk, per axis, per movement tick.
    pub move_distance: u32,
    /// Engagement radius when this kind is the attacker.
    pub kill_distance: u32,
}

impl KindProfile {
    /// The built-in profile for `kind`.
    pub const fn default_for(kind: Kind) -> Self {
        Self {
            move_distance: kind.default_move_distance(),
            kill_distance: kind.default_kill_distance(),
        }
    }
}

/// Per-kind profile table, indexed by [`Kind::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindProfiles([KindProfile; 3]);

impl KindProfiles {
    /// Profile for `kind`.
    pub fn get(&self, kind: Kind) -> KindProfile {
        self.0[kind.index()]
    }

    /// Replace the profile for `kind`.
    pub fn set(&mut self, kind: Kind, profile: KindProfile) {
        self.0[kind.index()] = profile;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, kind: Kind, profile: KindProfile) -> Self {
        self.set(kind, profile);
        self
    }

    /// Every kind shares `profile`.
    pub fn uniform(profile: KindProfile) -> Self {
        Self([profile; 3])
    }
}

impl Default for KindProfiles {
    fn default() -> Self {
        Self(Kind::ALL.map(KindProfile::default_for))
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`BattleConfig::validate()`] or while starting a
/// battle.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A map bound is negative.
    #[error("bounds must be non-negative, got ({max_x}, {max_y})")]
    InvalidBounds {
        /// Configured x maximum.
        max_x: i32,
        /// Configured y maximum.
        max_y: i32,
    },
    /// A loop rate is NaN, infinite, zero, negative, or so small that its
    /// period overflows.
    #[error("{which} rate must be finite and positive, got {value}")]
    InvalidRate {
        /// Which loop the rate belongs to.
        which: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Dice must have at least one side.
    #[error("dice_sides must be at least 1")]
    ZeroDiceSides,
    /// A resolver batch limit of zero would never resolve anything.
    #[error("resolve_batch must be at least 1 when set")]
    ZeroBatch,
    /// A background thread could not be spawned.
    #[error("thread spawn failed: {reason}")]
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

// ── BattleConfig ───────────────────────────────────────────────────

/// Complete configuration for a battle.
#[derive(Clone, Debug)]
pub struct BattleConfig {
    /// Map rectangle every move is clamped into. Default: 100 x 100.
    pub bounds: Bounds,
    /// Per-kind movement and engagement distances.
    pub profiles: KindProfiles,
    /// Movement ticks per second. Default: 10 (one tick per 100 ms).
    pub movement_rate_hz: f64,
    /// Resolver ticks per second. Default: 10.
    pub resolver_rate_hz: f64,
    /// Sides on each contest die; rolls are uniform in `1..=dice_sides`.
    /// Default: 6.
    pub dice_sides: u32,
    /// Maximum candidates resolved per resolver tick. `None` resolves
    /// everything queued when the tick starts. Default: `None`.
    pub resolve_batch: Option<usize>,
    /// Also notify sinks (with `won = false`) when the roll succeeds but the
    /// kind rule says the attacker is harmless. Default: `false`.
    pub report_harmless: bool,
    /// Base RNG seed. `None` draws one from the OS at start.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            profiles: KindProfiles::default(),
            movement_rate_hz: 10.0,
            resolver_rate_hz: 10.0,
            dice_sides: 6,
            resolve_batch: None,
            report_harmless: false,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Bounds must be non-negative.
        if self.bounds.max_x < 0 || self.bounds.max_y < 0 {
            return Err(ConfigError::InvalidBounds {
                max_x: self.bounds.max_x,
                max_y: self.bounds.max_y,
            });
        }
        // 2. Rates must be finite and positive, with a period that fits in
        //    a Duration.
        for (which, hz) in [
            ("movement", self.movement_rate_hz),
            ("resolver", self.resolver_rate_hz),
        ] {
            if !hz.is_finite() || hz <= 0.0 || period(hz).is_none() {
                return Err(ConfigError::InvalidRate { which, value: hz });
            }
        }
        // 3. Dice.
        if self.dice_sides == 0 {
            return Err(ConfigError::ZeroDiceSides);
        }
        // 4. Batch limit.
        if self.resolve_batch == Some(0) {
            return Err(ConfigError::ZeroBatch);
        }
        Ok(())
    }

    /// Sleep budget of one movement tick.
    ///
    /// Saturates to [`Duration::MAX`] for a rate [`validate()`](Self::validate)
    /// would reject.
    pub fn movement_interval(&self) -> Duration {
        period(self.movement_rate_hz).unwrap_or(Duration::MAX)
    }

    /// Sleep budget of one resolver tick. Saturates like
    /// [`movement_interval`](Self::movement_interval).
    pub fn resolver_interval(&self) -> Duration {
        period(self.resolver_rate_hz).unwrap_or(Duration::MAX)
    }
}

fn period(hz: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / hz).ok()
}

/// Derive the two per-thread seeds from a base seed.
///
/// The resolver seed is decorrelated from the movement seed so that the
/// two threads never draw the same stream.
pub(crate) fn split_seed(base: u64) -> (u64, u64) {
    (base, base ^ 0x9E37_79B9_7F4A_7C15)
}
