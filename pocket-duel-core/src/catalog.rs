//! Fixed roster of combatant templates and match assignment.

use crate::frontend::Color;
use crate::layout::{left_sprite, right_sprite};
use crate::sim::combatant::{Combatant, Move, Side};
use once_cell::sync::Lazy;
use phf::phf_map;
use rand::rngs::SmallRng;
use rand::Rng;

/// Immutable template list, built once per process. Matches always draw
/// deep copies; nothing ever mutates these entries.
pub static CATALOG: Lazy<Vec<Combatant>> = Lazy::new(|| {
    vec![
        template("Voltfox", 40, 11, 6, ("Jolt", 40, 95, 15), ("Quickstrike", 40, 100, 20), ("Static Guard", 0, 100, 25)),
        template("Cinderpup", 45, 10, 7, ("Ember Bite", 40, 95, 15), ("Scratch", 35, 100, 25), ("Ash Veil", 0, 100, 25)),
        template("Shellfin", 50, 9, 9, ("Water Jet", 40, 95, 15), ("Tackle", 40, 100, 25), ("Shell Up", 0, 100, 25)),
        template("Thornhare", 48, 9, 8, ("Vine Lash", 45, 100, 15), ("Tackle", 40, 100, 25), ("Spore Shield", 0, 90, 20)),
        template("Gloomwisp", 55, 12, 6, ("Shadow Bolt", 50, 90, 12), ("Lick", 30, 95, 20), ("Hex Veil", 0, 70, 8)),
        template("Boulderox", 60, 11, 12, ("Rock Toss", 50, 90, 15), ("Slam", 40, 100, 25), ("Harden", 0, 100, 20)),
    ]
});

type MoveSpec = (&'static str, i32, i32, i32);

fn template(name: &str, max_hp: i32, attack: i32, defense: i32, m1: MoveSpec, m2: MoveSpec, m3: MoveSpec) -> Combatant {
    let make = |(name, power, accuracy, pp): MoveSpec| Move::new(name, power, accuracy, pp);
    Combatant::new(name, max_hp, attack, defense, [make(m1), make(m2), make(m3)])
}

static SPRITE_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "Voltfox" => Color::Yellow,
    "Cinderpup" => Color::Red,
    "Shellfin" => Color::Blue,
    "Thornhare" => Color::Green,
    "Gloomwisp" => Color::Magenta,
    "Boulderox" => Color::Gray,
};

pub fn sprite_color(name: &str) -> Color {
    SPRITE_COLORS.get(name).copied().unwrap_or(Color::White)
}

/// Build the two sides for a fresh match: a coin flip decides which side
/// the human controls, and two distinct roster entries are drawn by
/// rejection sampling (the roster has at least two entries, so this
/// terminates). Both combatants are independent copies.
pub fn assign_sides(rng: &mut SmallRng) -> [Side; 2] {
    let human_first = rng.gen_range(0..=1) == 0;
    let first = rng.gen_range(0..CATALOG.len());
    let mut second = rng.gen_range(0..CATALOG.len());
    while second == first {
        second = rng.gen_range(0..CATALOG.len());
    }

    let mut left = CATALOG[first].clone();
    let mut right = CATALOG[second].clone();
    left.reset();
    right.reset();

    [
        Side {
            label: "Player 1".to_string(),
            is_human: human_first,
            combatant: left,
            sprite: left_sprite(),
        },
        Side {
            label: "Player 2".to_string(),
            is_human: !human_first,
            combatant: right,
            sprite: right_sprite(),
        },
    ]
}
