//! Cube CLI
//!
//! Command-line front end for the cube library: scramble a cube, check a cube
//! entered by hand, and break a solving sequence into stages.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cubo::moves::format_sequence;
use cubo::oracle::to_facelets;
use cubo::persistence::{self, PlanFile};
use cubo::{apply_sequence, build_plan, parse_sequence, validate, CubeState, ScrambleOracle};

/// Scrambles, validates and plans 3x3x3 cube solves.
#[derive(Parser)]
#[command(name = "cubo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a move sequence to a solved cube and print or save the result.
    Scramble {
        /// Moves in standard notation, e.g. "R U R' U'".
        moves: String,
        /// Write the cube as JSON to this file instead of printing it.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Check whether a cube stored as JSON is reachable.
    Validate {
        file: PathBuf,
    },
    /// Print the solver facelet string for a cube stored as JSON.
    Facelets {
        file: PathBuf,
    },
    /// Replay a known solving sequence from a cube stored as JSON.
    Plan {
        file: PathBuf,
        /// The solving sequence.
        #[arg(short, long)]
        moves: String,
        /// Save the start state and moves so the plan can be rebuilt later.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Scramble a cube, solve it by undoing the scramble, and show the stages.
    Demo {
        #[arg(default_value = "D2 R' D' R F")]
        scramble: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Scramble { moves, out }) => run_scramble(&moves, out),
        Some(Command::Validate { file }) => run_validate(&file),
        Some(Command::Facelets { file }) => run_facelets(&file),
        Some(Command::Plan { file, moves, save }) => run_plan(&file, &moves, save),
        Some(Command::Demo { scramble }) => run_demo(&scramble),
        // default: demo with the built-in scramble
        None => run_demo("D2 R' D' R F"),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Scrambles a solved cube and prints or saves it.
fn run_scramble(moves: &str, out: Option<PathBuf>) -> CliResult {
    let moves = parse_sequence(moves)?;
    let state = apply_sequence(&CubeState::solved(), &moves);

    match out {
        Some(path) => {
            persistence::save_state(&path, &state)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", persistence::to_json(&state)?),
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints every validation issue; fails if there are any.
fn run_validate(file: &Path) -> CliResult {
    let state = persistence::load_state(file)?;
    print!("{}", state);

    let issues = validate(&state);
    if issues.is_empty() {
        println!("Cube is valid");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} issues:", issues.len());
    for issue in &issues {
        println!("  {}", issue);
    }
    Ok(ExitCode::FAILURE)
}

fn run_facelets(file: &Path) -> CliResult {
    let state = persistence::load_state(file)?;
    println!("{}", to_facelets(&state)?);
    Ok(ExitCode::SUCCESS)
}

/// Replays a known sequence and prints its stages.
fn run_plan(file: &Path, moves: &str, save: Option<PathBuf>) -> CliResult {
    let plan_file = PlanFile {
        state: persistence::load_state(file)?,
        moves: parse_sequence(moves)?,
    };
    let plan = plan_file.rebuild()?;
    println!("{}", plan.summary());

    if let Some(path) = save {
        persistence::save_plan(&path, &plan_file)?;
        println!("Wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Scrambles, solves through the scramble oracle, and prints the stages.
fn run_demo(scramble: &str) -> CliResult {
    let scramble = parse_sequence(scramble)?;
    let oracle = ScrambleOracle::new(&scramble);
    let state = oracle.scrambled_state();

    println!("Scramble: {}", format_sequence(&scramble));
    print!("{}", state);
    let plan = build_plan(&state, &oracle)?;
    println!("Solution: {}", format_sequence(plan.moves()));
    println!("{}", plan.summary());
    Ok(ExitCode::SUCCESS)
}
