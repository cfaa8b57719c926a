use anyhow::{anyhow, Result};
use pocket_duel_core::prelude::*;
use std::env;
use std::path::PathBuf;

mod app;
mod simulate;
mod ui;

fn main() -> Result<()> {
    let mut args = env::args().skip(1).peekable();
    match args.peek().map(String::as_str) {
        Some("simulate") => {
            args.next();
            run_simulate(args)
        }
        Some("roster") => print_roster(),
        Some("help") | Some("--help") => {
            print_usage();
            Ok(())
        }
        _ => run_interactive(args),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: pocket-duel [--seed N] [--log-json PATH]\n       \
         pocket-duel simulate [--games N] [--difficulty easy|hard] [--seed N]\n       \
         pocket-duel roster"
    );
}

fn run_interactive(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut opts = app::AppOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let val = args.next().ok_or_else(|| anyhow!("--seed requires a number"))?;
                opts.seed = Some(val.parse()?);
            }
            "--log-json" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow!("--log-json requires a path"))?;
                opts.log_path = Some(PathBuf::from(val));
            }
            other => return Err(anyhow!("Unknown arg '{}' (try 'help')", other)),
        }
    }
    match app::run(opts) {
        // closing stdin (or typing q) is a normal way out of the menu loop
        Err(err) if err.downcast_ref::<ui::QuitRequested>().is_some() => Ok(()),
        other => other,
    }
}

fn run_simulate(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut games = 100usize;
    let mut difficulty = Difficulty::Easy;
    let mut seed = 0u64;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--games" => {
                let val = args.next().ok_or_else(|| anyhow!("--games requires a number"))?;
                games = val.parse()?;
            }
            "--difficulty" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow!("--difficulty requires easy or hard"))?;
                difficulty = parse_difficulty(&val)?;
            }
            "--seed" => {
                let val = args.next().ok_or_else(|| anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            other => return Err(anyhow!("Unknown arg '{}' for simulate", other)),
        }
    }
    let report = simulate::run_batch(games, difficulty, seed)?;
    println!(
        "simulated {} matches ({:?}): side A wins {}, side B wins {}, ties {}, retreats {}",
        games, difficulty, report.side_a_wins, report.side_b_wins, report.ties, report.retreats
    );
    Ok(())
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "hard" => Ok(Difficulty::Hard),
        other => Err(anyhow!("Unknown difficulty '{}' (use easy or hard)", other)),
    }
}

fn print_roster() -> Result<()> {
    for entry in CATALOG.iter() {
        println!(
            "{:<12} HP {:>3}  ATK {:>2}  DEF {:>2}",
            entry.name, entry.max_hp, entry.attack, entry.defense
        );
        for mv in &entry.moves {
            println!(
                "    {:<14} power {:>2}  accuracy {:>3}  pp {:>2}",
                mv.name, mv.power, mv.accuracy, mv.pp
            );
        }
    }
    Ok(())
}
