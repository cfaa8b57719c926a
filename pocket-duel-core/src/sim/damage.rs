//! Damage model: a pure function of attacker, defender, move and
//! difficulty. The variance roll is an explicit parameter so callers (and
//! tests) control the random factor, the engine draws it from the shared
//! rng stream.

use crate::session::Difficulty;
use crate::sim::combatant::{Combatant, Move};
use rand::Rng;

pub const MIN_DAMAGE: i32 = 1;
const DEFENSE_WEIGHT: f64 = 0.45;
const POWER_SCALE: f64 = 20.0;
const HARD_MODE_BOOST: f64 = 1.08;

/// Uniform roll in [0.85, 1.00], i.e. up to -15% off the raw damage.
pub fn roll_variance(rng: &mut impl Rng) -> f64 {
    rng.gen_range(85..=100) as f64 / 100.0
}

/// Hard mode boosts damage symmetrically for both sides, applied before
/// the variance roll. Result is rounded half-up and floored at 1.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    difficulty: Difficulty,
    variance: f64,
) -> i32 {
    let base = (attacker.attack as f64 - defender.defense as f64 * DEFENSE_WEIGHT).max(1.0);
    let mut raw = base * (mv.power as f64 / POWER_SCALE);
    if matches!(difficulty, Difficulty::Hard) {
        raw *= HARD_MODE_BOOST;
    }
    raw *= variance;
    ((raw + 0.5) as i32).max(MIN_DAMAGE)
}

/// An active shield halves the hit, rounding up. The shield itself is
/// consumed by the caller as part of the same resolution.
pub fn shielded_damage(damage: i32) -> i32 {
    (damage + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_combatant(attack: i32, defense: i32) -> Combatant {
        Combatant::new(
            "Testmon",
            40,
            attack,
            defense,
            [
                Move::new("Bolt", 40, 95, 15),
                Move::new("Jab", 35, 100, 20),
                Move::new("Guard", 0, 100, 25),
            ],
        )
    }

    #[test]
    fn pinned_variance_easy_scenario() {
        // base = 11 - 6 * 0.45 = 8.3, raw = 8.3 * 2 = 16.6,
        // round half-up: trunc(16.6 + 0.5) = 17
        let attacker = make_combatant(11, 0);
        let defender = make_combatant(0, 6);
        let mv = Move::new("Bolt", 40, 95, 15);
        let dmg = compute_damage(&attacker, &defender, &mv, Difficulty::Easy, 1.0);
        assert_eq!(dmg, 17);
    }

    #[test]
    fn hard_mode_boost_applies_before_variance() {
        // 16.6 * 1.08 = 17.928, trunc(17.928 + 0.5) = 18
        let attacker = make_combatant(11, 0);
        let defender = make_combatant(0, 6);
        let mv = Move::new("Bolt", 40, 95, 15);
        let dmg = compute_damage(&attacker, &defender, &mv, Difficulty::Hard, 1.0);
        assert_eq!(dmg, 18);
    }

    #[test]
    fn damage_never_drops_below_one() {
        let attacker = make_combatant(1, 0);
        let defender = make_combatant(0, 100);
        let mv = Move::new("Poke", 5, 100, 10);
        let dmg = compute_damage(&attacker, &defender, &mv, Difficulty::Easy, 0.85);
        assert_eq!(dmg, MIN_DAMAGE);
    }

    #[test]
    fn minimum_variance_rounds_down() {
        // 16.6 * 0.85 = 14.11 -> 14
        let attacker = make_combatant(11, 0);
        let defender = make_combatant(0, 6);
        let mv = Move::new("Bolt", 40, 95, 15);
        let dmg = compute_damage(&attacker, &defender, &mv, Difficulty::Easy, 0.85);
        assert_eq!(dmg, 14);
    }

    #[test]
    fn shield_halves_rounding_up() {
        assert_eq!(shielded_damage(17), 9);
        assert_eq!(shielded_damage(16), 8);
        assert_eq!(shielded_damage(1), 1);
    }

    #[test]
    fn variance_roll_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..500 {
            let v = roll_variance(&mut rng);
            assert!((0.85..=1.0).contains(&v), "variance {v} out of range");
        }
    }
}
