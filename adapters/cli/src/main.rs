#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Orb Maze in a terminal.
//!
//! Every input line becomes one session tick whose elapsed time is the real
//! time spent since the previous line.

mod driver;
mod render;
mod settings;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use orb_maze_core::{LoadPolicy, WELCOME_BANNER};
use orb_maze_system_questions::load_questions_from_path;
use orb_maze_world::{query, Session};

use crate::{
    driver::{parse_action, Action, Driver},
    settings::Settings,
};

/// Collect every orb, answer its question and reach the finish before time runs out.
#[derive(Debug, Parser)]
#[command(name = "orb-maze", version)]
struct CliArgs {
    /// TOML settings file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// JSON question source, overriding the settings file.
    #[arg(long, value_name = "PATH")]
    questions: Option<PathBuf>,
    /// Reject the whole question source if any record is malformed.
    #[arg(long)]
    strict: bool,
    /// Number of maze columns.
    #[arg(long)]
    width: Option<u32>,
    /// Number of maze rows.
    #[arg(long)]
    height: Option<u32>,
    /// Number of orbs to collect.
    #[arg(long)]
    orbs: Option<u32>,
    /// Seconds on the main clock at the start.
    #[arg(long)]
    game_time: Option<f32>,
    /// Seed for maze generation and every other random decision.
    #[arg(long)]
    seed: Option<u64>,
}

impl CliArgs {
    fn apply_to(&self, settings: &mut Settings) {
        let session = &mut settings.session;
        if let Some(width) = self.width {
            session.width = width;
        }
        if let Some(height) = self.height {
            session.height = height;
        }
        if let Some(orbs) = self.orbs {
            session.orb_count = orbs;
        }
        if let Some(game_time) = self.game_time {
            session.game_time = game_time;
        }
        if let Some(seed) = self.seed {
            session.rng_seed = seed;
        }
        if let Some(path) = &self.questions {
            settings.questions.path = path.clone();
        }
        if self.strict {
            settings.questions.policy = LoadPolicy::Strict;
        }
    }
}

/// Entry point for the Orb Maze command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply_to(&mut settings);

    let questions = load_questions_from_path(&settings.questions.path, settings.questions.policy)
        .with_context(|| {
            format!(
                "failed to load questions from {}",
                settings.questions.path.display()
            )
        })?;

    let mut session = Session::new(settings.session, questions);
    println!("{WELCOME_BANNER}");
    println!("{}", render::HELP);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, stdin.lock(), stdout.lock())
}

fn run(session: &mut Session, input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut driver = Driver::new(session);
    let mut last_tick = Instant::now();
    write!(output, "{}", render::frame(session, driver.player()))?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read player input")?;
        let Some(action) = parse_action(&line) else {
            writeln!(output, "{}", render::HELP)?;
            continue;
        };

        match action {
            Action::Quit => break,
            Action::Hint => {
                writeln!(output, "{}", render::hint(session, driver.player()))?;
                continue;
            }
            _ => {}
        }

        let commands = driver.commands_for(session, action);
        let now = Instant::now();
        let mut events = Vec::new();
        session.tick(now.duration_since(last_tick), &commands, &mut events);
        last_tick = now;
        driver.observe(session, &events);

        for event in &events {
            if let Some(message) = render::describe(event) {
                writeln!(output, "{message}")?;
            }
        }
        write!(output, "{}", render::frame(session, driver.player()))?;
        output.flush()?;
    }

    info!("leaving after {} orbs", query::collected_orbs(session));
    Ok(())
}
