//! Session-wide state: difficulty and running statistics.

use crate::engine::MatchResult;
use crate::sim::combatant::Side;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

/// Counters live for the whole process and are only ever incremented at
/// match conclusion. Passed explicitly through the menu and match loops.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub human_wins: u32,
    pub cpu_wins: u32,
    pub difficulty: Difficulty,
}

impl SessionStats {
    /// A retreat counts nothing; a tie counts only the game; a win credits
    /// whichever controller owned the winning side.
    pub fn record(&mut self, result: MatchResult, sides: &[Side; 2]) {
        match result {
            MatchResult::Retreat => {}
            MatchResult::Tie => self.games_played += 1,
            MatchResult::SideAWins => {
                self.games_played += 1;
                self.credit(sides[0].is_human);
            }
            MatchResult::SideBWins => {
                self.games_played += 1;
                self.credit(sides[1].is_human);
            }
        }
    }

    fn credit(&mut self, winner_is_human: bool) {
        if winner_is_human {
            self.human_wins += 1;
        } else {
            self.cpu_wins += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{left_sprite, right_sprite};
    use crate::sim::combatant::{Combatant, Move, Side};

    fn sides(human_first: bool) -> [Side; 2] {
        let combatant = Combatant::new(
            "Testmon",
            40,
            11,
            6,
            [
                Move::new("Bolt", 40, 95, 15),
                Move::new("Jab", 35, 100, 20),
                Move::new("Guard", 0, 100, 25),
            ],
        );
        [
            Side {
                label: "Player 1".to_string(),
                is_human: human_first,
                combatant: combatant.clone(),
                sprite: left_sprite(),
            },
            Side {
                label: "Player 2".to_string(),
                is_human: !human_first,
                combatant,
                sprite: right_sprite(),
            },
        ]
    }

    #[test]
    fn retreat_counts_nothing() {
        let mut stats = SessionStats::default();
        stats.record(MatchResult::Retreat, &sides(true));
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.human_wins, 0);
        assert_eq!(stats.cpu_wins, 0);
    }

    #[test]
    fn tie_counts_only_the_game() {
        let mut stats = SessionStats::default();
        stats.record(MatchResult::Tie, &sides(true));
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.human_wins, 0);
        assert_eq!(stats.cpu_wins, 0);
    }

    #[test]
    fn wins_credit_the_controlling_player() {
        let mut stats = SessionStats::default();
        stats.record(MatchResult::SideAWins, &sides(true));
        assert_eq!(stats.human_wins, 1);
        stats.record(MatchResult::SideBWins, &sides(true));
        assert_eq!(stats.cpu_wins, 1);
        assert_eq!(stats.games_played, 2);
    }

    #[test]
    fn counters_accumulate_across_matches() {
        let mut stats = SessionStats::default();
        for _ in 0..3 {
            stats.record(MatchResult::SideAWins, &sides(false));
        }
        stats.record(MatchResult::Tie, &sides(false));
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.cpu_wins, 3);
        assert_eq!(stats.human_wins, 0);
    }
}
