//! The dice gate in front of every fight.
//!
//! A [`Contest`] produces one `(attack, defense)` pair per fight. The
//! resolver only consults the kind rule when `attack > defense`; ties go to
//! the defender.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of attack and defense rolls.
///
/// Owned by exactly one resolver thread; implementations need not be
/// `Sync`.
pub trait Contest: Send {
    /// Draw one `(attack, defense)` pair.
    fn roll(&mut self) -> (u32, u32);
}

impl<C: Contest + ?Sized> Contest for Box<C> {
    fn roll(&mut self) -> (u32, u32) {
        (**self).roll()
    }
}

/// Two independent fair dice, each uniform in `1..=sides`.
#[derive(Clone, Debug)]
pub struct DiceContest {
    rng: ChaCha8Rng,
    sides: u32,
}

impl DiceContest {
    /// Dice with `sides` faces, seeded deterministically.
    ///
    /// `sides` is clamped to at least 1.
    pub fn new(sides: u32, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sides: sides.max(1),
        }
    }

    /// Number of faces on each die.
    pub fn sides(&self) -> u32 {
        self.sides
    }
}

impl Contest for DiceContest {
    fn roll(&mut self) -> (u32, u32) {
        let attack = self.rng.gen_range(1..=self.sides);
        let defense = self.rng.gen_range(1..=self.sides);
        (attack, defense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_on_the_die() {
        let mut dice = DiceContest::new(6, 7);
        for _ in 0..1000 {
            let (a, d) = dice.roll();
            assert!((1..=6).contains(&a));
            assert!((1..=6).contains(&d));
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = DiceContest::new(20, 99);
        let mut b = DiceContest::new(20, 99);
        for _ in 0..64 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn one_sided_dice_always_tie() {
        let mut dice = DiceContest::new(0, 1);
        assert_eq!(dice.sides(), 1);
        assert_eq!(dice.roll(), (1, 1));
    }

    #[test]
    fn six_sided_win_rate_is_plausible() {
        // P(attack > defense) on 2d6 is 15/36.
        let mut dice = DiceContest::new(6, 2024);
        let wins = (0..36_000).filter(|_| {
            let (a, d) = dice.roll();
            a > d
        });
        let rate = wins.count() as f64 / 36_000.0;
        assert!((rate - 15.0 / 36.0).abs() < 0.02, "rate = {rate}");
    }
}
