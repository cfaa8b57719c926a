//! Turn engine: the state machine that resolves one action per turn until
//! a match-ending condition.
//!
//! A match walks `SelectAction -> (AnimateProjectile -> ResolveOutcome)?
//! -> CheckTermination` and loops with the actor swapped, until a faint or
//! a retreat reaches `MatchOver`. Human sides block on the frontend's
//! touch wait; CPU sides consult the difficulty policy. All randomness
//! (accuracy, variance, CPU choice) comes from the single rng stream the
//! caller seeds once per process.

use crate::frontend::{Color, Frontend};
use crate::layout;
use crate::match_log::MatchLogger;
use crate::render;
use crate::session::Difficulty;
use crate::sim::combatant::{Combatant, Side, SideId};
use crate::sim::damage::{compute_damage, roll_variance, shielded_damage};
use crate::sim::policy::{policy_for, ActionChoice, CpuPolicy};
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;

/// Terminal classification of one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum MatchResult {
    SideAWins,
    SideBWins,
    Tie,
    /// Early exit: the actor healed and left. No winner is recorded.
    Retreat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    SelectAction,
    AnimateProjectile { move_idx: usize },
    ResolveOutcome { move_idx: usize, contact: bool },
    CheckTermination,
    MatchOver(MatchResult),
}

pub struct TurnEngine {
    sides: [Side; 2],
    current: SideId,
    difficulty: Difficulty,
    policy: Box<dyn CpuPolicy>,
    turn: u32,
    logger: Option<MatchLogger>,
}

impl TurnEngine {
    pub fn new(sides: [Side; 2], difficulty: Difficulty) -> Self {
        Self {
            sides,
            current: SideId::A,
            difficulty,
            policy: policy_for(difficulty),
            turn: 0,
            logger: None,
        }
    }

    /// Attach a transcript logger.
    pub fn with_logger(mut self) -> Self {
        self.logger = Some(MatchLogger::new());
        self
    }

    pub fn sides(&self) -> &[Side; 2] {
        &self.sides
    }

    pub fn logger(&self) -> Option<&MatchLogger> {
        self.logger.as_ref()
    }

    /// Restore both combatants for a replay. Session counters are owned by
    /// the caller and untouched; spent pp stays spent.
    pub fn reset_for_replay(&mut self) {
        for side in &mut self.sides {
            side.combatant.reset();
        }
        self.current = SideId::A;
        self.turn = 0;
        if let Some(logger) = &mut self.logger {
            *logger = MatchLogger::new();
        }
    }

    /// Run one full match to its terminal state and classify the outcome.
    pub fn run_match<F: Frontend>(&mut self, fe: &mut F, rng: &mut SmallRng) -> Result<MatchResult> {
        self.sides[0].combatant.defending = false;
        self.sides[1].combatant.defending = false;

        let mut phase = Phase::SelectAction;
        loop {
            phase = match phase {
                Phase::SelectAction => self.select_action(fe, rng)?,
                Phase::AnimateProjectile { move_idx } => self.animate_projectile(fe, move_idx),
                Phase::ResolveOutcome { move_idx, contact } => {
                    self.resolve_outcome(fe, rng, move_idx, contact)
                }
                Phase::CheckTermination => self.check_termination(fe),
                Phase::MatchOver(result) => {
                    self.conclude(fe, result);
                    return Ok(result);
                }
            };
        }
    }

    fn actor(&self) -> &Side {
        match self.current {
            SideId::A => &self.sides[0],
            SideId::B => &self.sides[1],
        }
    }

    fn select_action<F: Frontend>(&mut self, fe: &mut F, rng: &mut SmallRng) -> Result<Phase> {
        self.turn += 1;
        if let Some(logger) = &mut self.logger {
            logger.log_turn(self.turn);
        }

        render::draw_battle_scene(fe, &self.sides, None);
        let labels = action_labels(&self.actor().combatant);
        render::draw_action_grid(fe, &labels, None);
        fe.present_frame();

        let choice = if self.actor().is_human {
            // invalid taps are discarded and re-prompted; no turn consumed
            loop {
                let (tx, ty) = fe.wait_for_press()?;
                if let Some(idx) = layout::action_hit(tx, ty) {
                    render::draw_action_grid(fe, &labels, Some(idx));
                    fe.present_frame();
                    fe.sleep_ms(layout::HIGHLIGHT_MS);
                    break index_to_choice(idx);
                }
            }
        } else {
            fe.sleep_ms(layout::CPU_THINK_MS);
            let actor_combatant = self.actor().combatant.clone();
            let choice = self.policy.choose(&actor_combatant, rng);
            render::draw_action_grid(fe, &labels, Some(choice_to_index(choice)));
            fe.present_frame();
            fe.sleep_ms(layout::CPU_THINK_MS);
            choice
        };

        match choice {
            ActionChoice::Retreat => Ok(self.retreat(fe)),
            ActionChoice::Move(move_idx) => Ok(self.begin_move(fe, rng, move_idx)),
        }
    }

    fn retreat<F: Frontend>(&mut self, fe: &mut F) -> Phase {
        let (actor, _) = split_sides(&mut self.sides, self.current);
        actor.combatant.heal(layout::RETREAT_HEAL);
        let message = format!("{} retreated and healed.", actor.combatant.name);
        if let Some(logger) = &mut self.logger {
            logger.log_retreat(&actor.combatant.name);
            logger.log_heal(&actor.combatant.name, actor.combatant.hp, actor.combatant.max_hp);
        }
        render::flash_message(fe, &message, layout::MESSAGE_PAUSE_MS);
        Phase::MatchOver(MatchResult::Retreat)
    }

    fn begin_move<F: Frontend>(&mut self, fe: &mut F, rng: &mut SmallRng, move_idx: usize) -> Phase {
        let actor = self.actor();
        let actor_name = actor.combatant.name.clone();
        let mv = actor.combatant.moves[move_idx].clone();

        if !mv.has_pp() {
            // rejected before any state change; the turn still passes
            render::flash_message(fe, "No PP left for that move.", layout::SHORT_PAUSE_MS);
            return Phase::CheckTermination;
        }

        if mv.is_utility() {
            let (actor, _) = split_sides(&mut self.sides, self.current);
            actor.combatant.defending = true;
            actor.combatant.moves[move_idx].spend_pp();
            if let Some(logger) = &mut self.logger {
                logger.log_defend(&actor_name, &mv.name);
            }
            render::flash_message(
                fe,
                &format!("{} used {}! Defending...", actor_name, mv.name),
                layout::MESSAGE_PAUSE_MS,
            );
            return Phase::CheckTermination;
        }

        let roll = rng.gen_range(1..=100);
        if roll > mv.accuracy {
            // a miss still spends pp, and attacking drops the actor's own shield
            let (actor, _) = split_sides(&mut self.sides, self.current);
            actor.combatant.moves[move_idx].spend_pp();
            actor.combatant.defending = false;
            if let Some(logger) = &mut self.logger {
                logger.log_miss(&actor_name, &mv.name);
            }
            render::flash_message(
                fe,
                &format!("{} used {} but missed!", actor_name, mv.name),
                layout::MESSAGE_PAUSE_MS,
            );
            return Phase::CheckTermination;
        }

        Phase::AnimateProjectile { move_idx }
    }

    /// Step an 8x8 projectile from the actor toward the target, redrawing
    /// every frame. Stops on bounding-box contact or at the screen edge
    /// (a fallback miss; the geometry normally guarantees contact).
    fn animate_projectile<F: Frontend>(&mut self, fe: &mut F, move_idx: usize) -> Phase {
        let actor_sprite = self.actor().sprite;
        let target_sprite = match self.current {
            SideId::A => self.sides[1].sprite,
            SideId::B => self.sides[0].sprite,
        };
        let dir = match self.current {
            SideId::A => 1,
            SideId::B => -1,
        };
        let start_x = if dir > 0 {
            actor_sprite.x + actor_sprite.w
        } else {
            actor_sprite.x - layout::PROJECTILE_SIZE
        };
        let mut projectile = layout::Rect::new(
            start_x,
            actor_sprite.y + actor_sprite.h / 2 - layout::PROJECTILE_SIZE / 2,
            layout::PROJECTILE_SIZE,
            layout::PROJECTILE_SIZE,
        );

        let labels = action_labels(&self.actor().combatant);
        let mut contact = false;
        while projectile.x > 0 && projectile.x < layout::SCREEN_W {
            render::draw_battle_scene(fe, &self.sides, Some(projectile));
            render::draw_action_grid(fe, &labels, Some(move_idx));
            fe.present_frame();
            if projectile.intersects(&target_sprite) {
                contact = true;
                break;
            }
            projectile.x += dir * layout::PROJECTILE_STEP_PX;
            fe.sleep_ms(layout::PROJECTILE_FRAME_MS);
        }

        Phase::ResolveOutcome { move_idx, contact }
    }

    fn resolve_outcome<F: Frontend>(
        &mut self,
        fe: &mut F,
        rng: &mut SmallRng,
        move_idx: usize,
        contact: bool,
    ) -> Phase {
        let difficulty = self.difficulty;
        let (actor, target) = split_sides(&mut self.sides, self.current);
        let mv = actor.combatant.moves[move_idx].clone();
        let actor_name = actor.combatant.name.clone();
        let target_name = target.combatant.name.clone();

        if contact {
            let variance = roll_variance(rng);
            let mut damage = compute_damage(&actor.combatant, &target.combatant, &mv, difficulty, variance);
            let shielded = target.combatant.defending;
            if shielded {
                damage = shielded_damage(damage);
                target.combatant.defending = false;
            }
            target.combatant.take_damage(damage);
            actor.combatant.moves[move_idx].spend_pp();
            actor.combatant.defending = false;

            let target_hp = target.combatant.hp;
            let target_max = target.combatant.max_hp;
            let fainted = target.combatant.is_fainted();
            if let Some(logger) = &mut self.logger {
                logger.log_move(&actor_name, &mv.name, &target_name);
                if shielded {
                    logger.log_shield(&target_name);
                }
                logger.log_damage(&target_name, target_hp, target_max);
                if fainted {
                    logger.log_faint(&target_name);
                }
            }

            let used = format!("{} used {}!", actor_name, mv.name);
            let hit = if shielded {
                format!("Hit for {damage} dmg (shielded)")
            } else {
                format!("Hit for {damage} dmg")
            };
            render::flash_lines(fe, &[&used, &hit], layout::MESSAGE_PAUSE_MS);
        } else {
            actor.combatant.moves[move_idx].spend_pp();
            actor.combatant.defending = false;
            if let Some(logger) = &mut self.logger {
                logger.log_miss(&actor_name, &mv.name);
            }
            render::flash_message(
                fe,
                &format!("{} used {} - no hit.", actor_name, mv.name),
                layout::SHORT_PAUSE_MS,
            );
        }

        Phase::CheckTermination
    }

    fn check_termination<F: Frontend>(&mut self, fe: &mut F) -> Phase {
        if let Some(result) = match_outcome(&self.sides) {
            return Phase::MatchOver(result);
        }
        fe.sleep_ms(layout::TURN_SWAP_PAUSE_MS);
        self.current = self.current.other();
        Phase::SelectAction
    }

    fn conclude<F: Frontend>(&mut self, fe: &mut F, result: MatchResult) {
        match result {
            // the retreat message was already shown
            MatchResult::Retreat => {}
            MatchResult::Tie => {
                if let Some(logger) = &mut self.logger {
                    logger.log_tie();
                }
                render::flash_message(fe, "It's a tie!", layout::RESULT_PAUSE_MS);
            }
            MatchResult::SideAWins | MatchResult::SideBWins => {
                let (winner, loser) = if result == MatchResult::SideAWins {
                    (&self.sides[0], &self.sides[1])
                } else {
                    (&self.sides[1], &self.sides[0])
                };
                let lost = format!("{} lost.", loser.label);
                let won = format!("{} wins!", winner.label);
                let winner_label = winner.label.clone();
                if let Some(logger) = &mut self.logger {
                    logger.log_win(&winner_label);
                }
                render::flash_lines(fe, &[&lost, &won], layout::RESULT_PAUSE_MS);
            }
        }
    }
}

/// Classify a terminal position, if it is one. Both sides fainting in the
/// same resolution is a tie, not an error.
pub fn match_outcome(sides: &[Side; 2]) -> Option<MatchResult> {
    let a_down = sides[0].combatant.is_fainted();
    let b_down = sides[1].combatant.is_fainted();
    match (a_down, b_down) {
        (true, true) => Some(MatchResult::Tie),
        (true, false) => Some(MatchResult::SideBWins),
        (false, true) => Some(MatchResult::SideAWins),
        (false, false) => None,
    }
}

/// Tap top half = yes, bottom half = no.
pub fn prompt_replay<F: Frontend>(fe: &mut F) -> Result<bool> {
    fe.clear_screen(Color::Black);
    fe.write_line("Play again? Tap the top half for YES, bottom half for NO.");
    fe.present_frame();
    let (_, ty) = fe.wait_for_press()?;
    fe.sleep_ms(layout::CPU_THINK_MS);
    Ok(ty < layout::SCREEN_H / 2)
}

fn split_sides(sides: &mut [Side; 2], current: SideId) -> (&mut Side, &mut Side) {
    let (left, right) = sides.split_at_mut(1);
    match current {
        SideId::A => (&mut left[0], &mut right[0]),
        SideId::B => (&mut right[0], &mut left[0]),
    }
}

fn action_labels(combatant: &Combatant) -> [String; 4] {
    [
        combatant.moves[0].label(),
        combatant.moves[1].label(),
        combatant.moves[2].label(),
        "Retreat".to_string(),
    ]
}

fn index_to_choice(idx: usize) -> ActionChoice {
    if idx == 3 {
        ActionChoice::Retreat
    } else {
        ActionChoice::Move(idx)
    }
}

fn choice_to_index(choice: ActionChoice) -> usize {
    match choice {
        ActionChoice::Move(idx) => idx,
        ActionChoice::Retreat => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{left_sprite, right_sprite};
    use crate::sim::combatant::Move;

    fn side(label: &str, hp: i32) -> Side {
        let mut combatant = Combatant::new(
            label.to_string(),
            40,
            11,
            6,
            [
                Move::new("Bolt", 40, 95, 15),
                Move::new("Jab", 35, 100, 20),
                Move::new("Guard", 0, 100, 25),
            ],
        );
        combatant.hp = hp;
        Side {
            label: label.to_string(),
            is_human: false,
            combatant,
            sprite: if label.ends_with('1') { left_sprite() } else { right_sprite() },
        }
    }

    #[test]
    fn outcome_classification() {
        let alive = [side("Player 1", 10), side("Player 2", 10)];
        assert_eq!(match_outcome(&alive), None);

        let a_down = [side("Player 1", 0), side("Player 2", 10)];
        assert_eq!(match_outcome(&a_down), Some(MatchResult::SideBWins));

        let b_down = [side("Player 1", 10), side("Player 2", 0)];
        assert_eq!(match_outcome(&b_down), Some(MatchResult::SideAWins));

        let both_down = [side("Player 1", 0), side("Player 2", 0)];
        assert_eq!(match_outcome(&both_down), Some(MatchResult::Tie));
    }

    #[test]
    fn labels_show_pp_and_retreat() {
        let s = side("Player 1", 10);
        let labels = action_labels(&s.combatant);
        assert_eq!(labels[0], "Bolt (15)");
        assert_eq!(labels[3], "Retreat");
    }

    #[test]
    fn action_index_round_trip() {
        for idx in 0..4 {
            assert_eq!(choice_to_index(index_to_choice(idx)), idx);
        }
    }
}
