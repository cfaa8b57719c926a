//! Headless CPU-vs-CPU batches over the null frontend.

use anyhow::Result;
use pocket_duel_core::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, Default)]
pub struct BatchReport {
    pub side_a_wins: u64,
    pub side_b_wins: u64,
    pub ties: u64,
    pub retreats: u64,
}

pub fn run_batch(games: usize, difficulty: Difficulty, seed: u64) -> Result<BatchReport> {
    let results: Vec<MatchResult> = (0..games as u64)
        .into_par_iter()
        .map(|idx| {
            // one independent stream per match, derived from the base seed
            let mut rng = SmallRng::seed_from_u64(seed ^ idx.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let mut sides = assign_sides(&mut rng);
            for side in &mut sides {
                side.is_human = false;
            }
            let mut engine = TurnEngine::new(sides, difficulty);
            engine.run_match(&mut NullFrontend, &mut rng)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut report = BatchReport::default();
    for result in results {
        match result {
            MatchResult::SideAWins => report.side_a_wins += 1,
            MatchResult::SideBWins => report.side_b_wins += 1,
            MatchResult::Tie => report.ties += 1,
            MatchResult::Retreat => report.retreats += 1,
        }
    }
    Ok(report)
}
