//! Interactive session: main menu, difficulty selection, battle loop and
//! the static info screens, all driven through the frontend trait.

use crate::ui::ConsoleFrontend;
use anyhow::{Context, Result};
use pocket_duel_core::prelude::*;
use pocket_duel_core::{layout, render};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct AppOptions {
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
}

const MENU_LABELS: [&str; 4] = ["1. Play", "2. Instructions", "3. Statistics", "4. Credits"];

const EASY_BOX: Rect = Rect { x: 30, y: 50, w: 120, h: 40 };
const HARD_BOX: Rect = Rect { x: 170, y: 50, w: 120, h: 40 };
const START_BOX: Rect = Rect { x: 30, y: 110, w: 260, h: 40 };

pub fn run(opts: AppOptions) -> Result<()> {
    let mut fe = ConsoleFrontend::new();
    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut session = SessionStats::default();

    loop {
        let choice = main_menu(&mut fe)?;
        match choice {
            0 => play(&mut fe, &mut rng, &mut session, opts.log_path.as_deref())?,
            1 => instructions(&mut fe),
            2 => statistics(&mut fe, &session),
            3 => credits(&mut fe),
            _ => unreachable!("menu_hit only yields 0..4"),
        }
    }
}

fn main_menu(fe: &mut ConsoleFrontend) -> Result<usize> {
    fe.clear_screen(Color::Black);
    fe.write_text_at("POCKET DUEL", 110, 16);
    for (idx, label) in MENU_LABELS.iter().enumerate() {
        let rect = layout::menu_button(idx);
        fe.draw_rect(rect);
        fe.write_text_at(label, rect.x + 10, rect.y + 16);
    }
    fe.present_frame();

    loop {
        let (tx, ty) = fe.wait_for_press()?;
        if let Some(idx) = layout::menu_hit(tx, ty) {
            return Ok(idx);
        }
    }
}

fn play(
    fe: &mut ConsoleFrontend,
    rng: &mut SmallRng,
    session: &mut SessionStats,
    log_path: Option<&std::path::Path>,
) -> Result<()> {
    session.difficulty = select_difficulty(fe)?;

    let sides = assign_sides(rng);
    let mut engine = TurnEngine::new(sides, session.difficulty).with_logger();

    loop {
        let result = engine.run_match(fe, rng)?;
        session.record(result, engine.sides());

        if let (Some(path), Some(logger)) = (log_path, engine.logger()) {
            let json = serde_json::to_string_pretty(&logger.to_json())?;
            fs::write(path, json + "\n")
                .with_context(|| format!("writing match log to {}", path.display()))?;
        }

        // a retreat ends the session's interest in this pairing outright
        if result == MatchResult::Retreat {
            return Ok(());
        }
        if !prompt_replay(fe)? {
            return Ok(());
        }
        engine.reset_for_replay();
        render::flash_message(fe, "Restarting match...", layout::SHORT_PAUSE_MS);
    }
}

fn select_difficulty(fe: &mut ConsoleFrontend) -> Result<Difficulty> {
    fe.clear_screen(Color::Black);
    fe.write_text_at("Play - Select Difficulty", 80, 20);
    fe.draw_rect(EASY_BOX);
    fe.write_text_at("Easy", EASY_BOX.x + 10, EASY_BOX.y + 14);
    fe.draw_rect(HARD_BOX);
    fe.write_text_at("Hard", HARD_BOX.x + 10, HARD_BOX.y + 14);
    fe.draw_rect(START_BOX);
    fe.write_text_at("Start (default Easy)", START_BOX.x + 10, START_BOX.y + 14);
    fe.present_frame();

    let (tx, ty) = fe.wait_for_press()?;
    let difficulty = if EASY_BOX.contains(tx, ty) {
        render::flash_message(fe, "Difficulty: EASY", layout::SHORT_PAUSE_MS);
        Difficulty::Easy
    } else if HARD_BOX.contains(tx, ty) {
        render::flash_message(fe, "Difficulty: HARD", layout::SHORT_PAUSE_MS);
        Difficulty::Hard
    } else if START_BOX.contains(tx, ty) {
        Difficulty::Easy
    } else {
        render::flash_message(fe, "No selection, starting Easy.", layout::SHORT_PAUSE_MS);
        Difficulty::Easy
    };
    Ok(difficulty)
}

fn instructions(fe: &mut ConsoleFrontend) {
    render::flash_lines(
        fe,
        &[
            "How to play:",
            "- Each fighter has 3 moves and a Retreat button.",
            "- Moves cost PP; a miss still spends it.",
            "- The shield move halves the next hit you take.",
            "- Retreat heals a little and ends the match.",
            "Tap anywhere to continue.",
        ],
        0,
    );
    wait_any(fe);
}

fn statistics(fe: &mut ConsoleFrontend, session: &SessionStats) {
    render::flash_lines(
        fe,
        &[
            "Session statistics:",
            &format!("Games played: {}", session.games_played),
            &format!("Your wins:    {}", session.human_wins),
            &format!("CPU wins:     {}", session.cpu_wins),
            &format!("Difficulty:   {:?}", session.difficulty),
            "Tap anywhere to continue.",
        ],
        0,
    );
    wait_any(fe);
}

fn credits(fe: &mut ConsoleFrontend) {
    render::flash_lines(
        fe,
        &[
            "Pocket Duel",
            "A tiny touchscreen battle sim.",
            "Tap anywhere to continue.",
        ],
        0,
    );
    wait_any(fe);
}

fn wait_any(fe: &mut ConsoleFrontend) {
    // any tap dismisses; a quit error is deferred to the next menu wait
    let _ = fe.wait_for_press();
}
