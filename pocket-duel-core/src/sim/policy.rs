//! CPU action selection, pluggable per difficulty tier.

use crate::session::Difficulty;
use crate::sim::combatant::Combatant;
use rand::rngs::SmallRng;
use rand::Rng;

/// One of the four in-battle actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionChoice {
    Move(usize),
    Retreat,
}

pub trait CpuPolicy {
    fn choose(&mut self, actor: &Combatant, rng: &mut SmallRng) -> ActionChoice;
}

pub fn policy_for(difficulty: Difficulty) -> Box<dyn CpuPolicy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyCpu),
        Difficulty::Hard => Box::new(HardCpu),
    }
}

/// Weighted random over the four actions. Non-uniform on purpose: the two
/// damaging moves dominate, retreat stays rare.
pub struct EasyCpu;

impl CpuPolicy for EasyCpu {
    fn choose(&mut self, _actor: &Combatant, rng: &mut SmallRng) -> ActionChoice {
        let roll = rng.gen_range(1..=100);
        if roll <= 35 {
            ActionChoice::Move(0)
        } else if roll <= 70 {
            ActionChoice::Move(1)
        } else if roll <= 85 {
            ActionChoice::Move(2)
        } else {
            ActionChoice::Retreat
        }
    }
}

/// Picks the strongest move that still has pp 85% of the time, otherwise
/// retreats. Retreats outright once every move is out of pp.
pub struct HardCpu;

impl CpuPolicy for HardCpu {
    fn choose(&mut self, actor: &Combatant, rng: &mut SmallRng) -> ActionChoice {
        let mut best: Option<usize> = None;
        for (idx, mv) in actor.moves.iter().enumerate() {
            if !mv.has_pp() {
                continue;
            }
            match best {
                Some(current) if mv.power <= actor.moves[current].power => {}
                _ => best = Some(idx),
            }
        }
        match best {
            Some(idx) if rng.gen_range(1..=100) <= 85 => ActionChoice::Move(idx),
            _ => ActionChoice::Retreat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::combatant::Move;
    use rand::SeedableRng;

    fn actor_with_pp(pp: [i32; 3]) -> Combatant {
        Combatant::new(
            "Testmon",
            40,
            11,
            6,
            [
                Move::new("Bolt", 40, 95, pp[0]),
                Move::new("Heavy", 50, 90, pp[1]),
                Move::new("Guard", 0, 100, pp[2]),
            ],
        )
    }

    #[test]
    fn easy_policy_is_non_uniform() {
        let mut policy = EasyCpu;
        let mut rng = SmallRng::seed_from_u64(7);
        let actor = actor_with_pp([15, 15, 15]);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            match policy.choose(&actor, &mut rng) {
                ActionChoice::Move(idx) => counts[idx] += 1,
                ActionChoice::Retreat => counts[3] += 1,
            }
        }
        // attacking moves dominate, retreat is the rarest band
        assert!(counts[0] > counts[3]);
        assert!(counts[1] > counts[3]);
        let retreat_rate = counts[3] as f64 / 4000.0;
        assert!(
            (0.05..0.30).contains(&retreat_rate),
            "retreat rate {retreat_rate} outside the easy band"
        );
    }

    #[test]
    fn hard_policy_prefers_strongest_usable_move() {
        let mut policy = HardCpu;
        let mut rng = SmallRng::seed_from_u64(11);
        let actor = actor_with_pp([15, 15, 15]);
        let mut best_picks = 0usize;
        for _ in 0..400 {
            if policy.choose(&actor, &mut rng) == ActionChoice::Move(1) {
                best_picks += 1;
            }
        }
        assert!(best_picks > 300, "expected mostly the 50-power move, got {best_picks}");
    }

    #[test]
    fn hard_policy_skips_empty_moves() {
        let mut policy = HardCpu;
        let mut rng = SmallRng::seed_from_u64(13);
        let actor = actor_with_pp([15, 0, 15]);
        for _ in 0..200 {
            match policy.choose(&actor, &mut rng) {
                ActionChoice::Move(idx) => assert_ne!(idx, 1, "picked a move with no pp"),
                ActionChoice::Retreat => {}
            }
        }
    }

    #[test]
    fn hard_policy_retreats_when_everything_is_empty() {
        let mut policy = HardCpu;
        let mut rng = SmallRng::seed_from_u64(17);
        let actor = actor_with_pp([0, 0, 0]);
        assert_eq!(policy.choose(&actor, &mut rng), ActionChoice::Retreat);
    }
}
