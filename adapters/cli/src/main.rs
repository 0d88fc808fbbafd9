#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Outbreak simulations.
//!
//! Runs interactively by default, prompting for the grid size, the initial
//! zombie, the move sequence and the creature list, then offering to run
//! again. Supplying `--grid-size`, `--zombie` and `--moves` instead executes
//! a single scripted run.

mod input;

use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use outbreak_core::{Direction, GridSize, Position, WELCOME_BANNER};
use outbreak_logging::TranscriptLogger;
use outbreak_system_infection::Game;

use crate::input::{parse_grid_size, parse_moves, parse_position, parse_position_list, InputError};

/// Command-line arguments accepted by the simulator.
#[derive(Debug, Parser)]
#[command(name = "outbreak", about = "Toroidal zombie infection simulator")]
struct Args {
    /// Grid dimension for a scripted run (positive integer).
    #[arg(long)]
    grid_size: Option<String>,
    /// Initial zombie position for a scripted run, e.g. "(0,0)".
    #[arg(long)]
    zombie: Option<String>,
    /// Move sequence for a scripted run, e.g. "DRDR".
    #[arg(long)]
    moves: Option<String>,
    /// Creature positions for a scripted run, e.g. "(1,1)(2,2)".
    #[arg(long)]
    creatures: Option<String>,
}

/// Validated inputs for one simulation run.
#[derive(Debug)]
struct SimulationInputs {
    grid_size: GridSize,
    zombie: Position,
    moves: Vec<Direction>,
    creatures: Vec<Position>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("{WELCOME_BANNER}");

    if let Some(inputs) = scripted_inputs(&args)? {
        run_simulation(&inputs);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    loop {
        let inputs = collect_inputs(&mut lines)?;
        run_simulation(&inputs);

        if !confirm(&mut lines, "Do you want to run another simulation? (y/n): ")? {
            break;
        }
    }

    println!("Game simulation completed.");
    Ok(())
}

/// Assembles scripted inputs from the provided flags, if any were given.
fn scripted_inputs(args: &Args) -> Result<Option<SimulationInputs>> {
    if args.grid_size.is_none() && args.zombie.is_none() && args.moves.is_none() {
        if args.creatures.is_some() {
            bail!("--creatures requires --grid-size, --zombie and --moves");
        }
        return Ok(None);
    }

    let (Some(grid_size), Some(zombie), Some(moves)) =
        (&args.grid_size, &args.zombie, &args.moves)
    else {
        bail!("scripted runs require --grid-size, --zombie and --moves together");
    };

    let inputs = SimulationInputs {
        grid_size: parse_grid_size(grid_size).context("invalid --grid-size")?,
        zombie: parse_position(zombie).context("invalid --zombie")?,
        moves: parse_moves(moves).context("invalid --moves")?,
        creatures: match &args.creatures {
            Some(creatures) => parse_position_list(creatures).context("invalid --creatures")?,
            None => Vec::new(),
        },
    };
    Ok(Some(inputs))
}

/// Prompts for every input in order, re-prompting until each one validates.
fn collect_inputs(lines: &mut impl BufRead) -> Result<SimulationInputs> {
    let grid_size = prompt_until(
        lines,
        "Please enter the dimension of the grid (positive integer): ",
        parse_grid_size,
    )?;
    let zombie = prompt_until(
        lines,
        "Please enter the initial position of the zombie (format: (x,y)): ",
        parse_position,
    )?;
    let moves = prompt_until(
        lines,
        "Please enter a list of moves the zombies will make (list of U, D, L, R): ",
        parse_moves,
    )?;
    let creatures = prompt_until(
        lines,
        "Please enter a list of initial positions of the creatures (format: (x1,y1)(x2,y2)...): ",
        parse_position_list,
    )?;

    Ok(SimulationInputs {
        grid_size,
        zombie,
        moves,
        creatures,
    })
}

/// Repeats the prompt until the parser accepts the entered line.
fn prompt_until<T>(
    lines: &mut impl BufRead,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, InputError>,
) -> Result<T> {
    loop {
        let line = read_line(lines, prompt)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(error) => println!("Invalid input: {error}. Please try again."),
        }
    }
}

/// Asks a yes/no question; anything starting with `y` counts as yes.
fn confirm(lines: &mut impl BufRead, prompt: &str) -> Result<bool> {
    let answer = read_line(lines, prompt)?;
    Ok(answer.trim().to_lowercase().starts_with('y'))
}

fn read_line(lines: &mut impl BufRead, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    let read = lines
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        bail!("input stream closed before the simulation finished");
    }
    Ok(line)
}

/// Runs a single simulation, printing the transcript summary via the logger.
fn run_simulation(inputs: &SimulationInputs) {
    let mut game = Game::new(inputs.grid_size, inputs.moves.clone());
    let logger = Rc::new(RefCell::new(TranscriptLogger::new()));
    game.add_observer(logger.clone());

    game.initialize(inputs.zombie, &inputs.creatures);
    game.run();
}
