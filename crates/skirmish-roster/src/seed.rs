//! Populating a fresh map.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_core::{Actor, ActorSet, Bounds, Kind, Position};

/// Display stem used when generating names for `kind`.
pub fn name_stem(kind: Kind) -> &'static str {
    match kind {
        Kind::Melee => "Knight",
        Kind::Serpent => "Dragon",
        Kind::Flyer => "Pegasus",
    }
}

/// Generated name for the `index`-th actor of a roster, e.g. `Dragon_4`.
pub fn generate_name(kind: Kind, index: usize) -> String {
    format!("{}_{index}", name_stem(kind))
}

/// `count` actors with uniformly random kinds and positions inside
/// `bounds`, named by [`generate_name`].
pub fn random_roster<R: Rng + ?Sized>(count: usize, bounds: Bounds, rng: &mut R) -> ActorSet {
    let bounds = bounds.normalized();
    let mut set = ActorSet::with_capacity(count);
    for i in 0..count {
        let kind = Kind::ALL[rng.gen_range(0..Kind::ALL.len())];
        let pos = Position::new(rng.gen_range(0..=bounds.max_x), rng.gen_range(0..=bounds.max_y));
        set.spawn(kind, generate_name(kind, i), pos);
    }
    set
}

/// [`random_roster`] driven by a seeded ChaCha8 generator.
pub fn seeded_roster(count: usize, bounds: Bounds, seed: u64) -> ActorSet {
    random_roster(count, bounds, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// [`seeded_roster`] with a seed drawn from the OS.
pub fn fresh_roster(count: usize, bounds: Bounds) -> ActorSet {
    seeded_roster(count, bounds, rand::random())
}

/// Actors at caller-chosen positions, named by [`generate_name`].
pub fn place<I>(placements: I) -> ActorSet
where
    I: IntoIterator<Item = (Kind, Position)>,
{
    placements
        .into_iter()
        .enumerate()
        .map(|(i, (kind, pos))| Actor::spawn(kind, generate_name(kind, i), pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_the_stem() {
        assert_eq!(generate_name(Kind::Melee, 3), "Knight_3");
        assert_eq!(generate_name(Kind::Serpent, 4), "Dragon_4");
        assert_eq!(generate_name(Kind::Flyer, 5), "Pegasus_5");
    }

    #[test]
    fn random_roster_respects_bounds() {
        let bounds = Bounds::new(7, 3);
        let set = seeded_roster(200, bounds, 1);
        assert_eq!(set.len(), 200);
        for (i, a) in set.iter().enumerate() {
            assert!(bounds.contains(a.position()));
            assert_eq!(a.name(), generate_name(a.kind(), i));
        }
    }

    #[test]
    fn negative_literal_bounds_pin_to_the_axis() {
        let set = seeded_roster(10, Bounds { max_x: -4, max_y: 2 }, 3);
        assert_eq!(set.len(), 10);
        for a in set.iter() {
            assert_eq!(a.position().x, 0);
            assert!((0..=2).contains(&a.position().y));
        }
    }

    #[test]
    fn every_kind_appears() {
        let set = seeded_roster(60, Bounds::default(), 2);
        for kind in Kind::ALL {
            assert!(set.iter().any(|a| a.kind() == kind), "{kind} missing");
        }
    }

    #[test]
    fn same_seed_same_roster() {
        let a = seeded_roster(20, Bounds::default(), 9);
        let b = seeded_roster(20, Bounds::default(), 9);
        let key = |s: &ActorSet| {
            s.iter()
                .map(|x| (x.kind(), x.position(), x.name().to_string()))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&a), key(&b));
    }

    #[test]
    fn place_uses_given_positions() {
        let set = place([
            (Kind::Melee, Position::new(1, 2)),
            (Kind::Flyer, Position::new(3, 4)),
        ]);
        let names: Vec<_> = set.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, ["Knight_0", "Pegasus_1"]);
        assert_eq!(set.get_index(1).unwrap().position(), Position::new(3, 4));
    }
}
