//! Benchmark profiles for the Skirmish engine.
//!
//! Provides pre-built battle setups for benchmarks and examples:
//!
//! - [`reference_profile`]: 50 actors on a 100x100 map at default rates
//! - [`stress_profile`]: 500 actors on a 316x316 map, loops unthrottled
//! - [`crowded_profile`]: `n` actors packed into a 20x20 map so that most
//!   pairs are in range

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skirmish_core::{ActorSet, Bounds};
use skirmish_engine::BattleConfig;
use skirmish_roster::seeded_roster;

/// A battle configuration together with its starting roster.
pub struct Profile {
    /// Engine settings.
    pub config: BattleConfig,
    /// Actors, freshly seeded and all alive.
    pub actors: ActorSet,
}

/// 50 actors on a 100x100 map, 10 Hz loops, 2d6 contests.
pub fn reference_profile(seed: u64) -> Profile {
    let config = BattleConfig {
        seed: Some(seed),
        ..BattleConfig::default()
    };
    Profile {
        actors: seeded_roster(50, config.bounds, seed),
        config,
    }
}

/// 500 actors on a 316x316 map (ten times the area), 1 kHz loops.
pub fn stress_profile(seed: u64) -> Profile {
    let config = BattleConfig {
        bounds: Bounds::new(316, 316),
        movement_rate_hz: 1000.0,
        resolver_rate_hz: 1000.0,
        seed: Some(seed),
        ..BattleConfig::default()
    };
    Profile {
        actors: seeded_roster(500, config.bounds, seed),
        config,
    }
}

/// `count` actors packed into a 20x20 map.
pub fn crowded_profile(count: usize, seed: u64) -> Profile {
    let config = BattleConfig {
        bounds: Bounds::new(20, 20),
        seed: Some(seed),
        ..BattleConfig::default()
    };
    Profile {
        actors: seeded_roster(count, config.bounds, seed),
        config,
    }
}
