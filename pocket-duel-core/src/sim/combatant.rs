//! Mutable battle-state data model: moves, combatants and sides.

use crate::layout::Rect;
use serde::Serialize;

/// One usable action. `power == 0` marks a utility (defend) move; anything
/// greater is a damaging move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Move {
    pub name: String,
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
}

impl Move {
    pub fn new(name: impl Into<String>, power: i32, accuracy: i32, pp: i32) -> Self {
        Self {
            name: name.into(),
            power,
            accuracy,
            pp,
        }
    }

    pub fn is_utility(&self) -> bool {
        self.power == 0
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Consume one use. pp never goes below zero.
    pub fn spend_pp(&mut self) {
        if self.pp > 0 {
            self.pp -= 1;
        }
    }

    /// Button label showing remaining uses, e.g. `Jolt (15)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.pp)
    }
}

#[derive(Clone, Debug)]
pub struct Combatant {
    pub name: String,
    pub max_hp: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub moves: [Move; 3],
    pub defending: bool,
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_hp: i32, attack: i32, defense: i32, moves: [Move; 3]) -> Self {
        Self {
            name: name.into(),
            max_hp,
            hp: max_hp,
            attack,
            defense,
            moves,
            defending: false,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage.max(0)).max(0);
    }

    /// Heal, capped at max hp.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    /// Restore for a fresh match: full hp, shield off, negative pp floored.
    /// Remaining pp is deliberately not refilled across replays.
    pub fn reset(&mut self) {
        self.hp = self.max_hp;
        self.defending = false;
        for mv in &mut self.moves {
            if mv.pp < 0 {
                mv.pp = 0;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SideId {
    A,
    B,
}

impl SideId {
    pub fn other(self) -> SideId {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }
}

/// Pairing of a combatant with its control mode and draw placement.
/// Win counts live in the session statistics, not here.
#[derive(Clone, Debug)]
pub struct Side {
    pub label: String,
    pub is_human: bool,
    pub combatant: Combatant,
    pub sprite: Rect,
}
