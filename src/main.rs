//! Statue Shape Puzzle
//!
//! Terminal front end for the statue puzzle: three statues call out shapes,
//! hold volumes, and the player dissects volumes to trade shapes between them
//! until the active strategy reports the puzzle as correct.

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use verity::display::{self, shape_label, volume_label};
use verity::error::ParseError;
use verity::shapes::{parse_shapes, parse_volumes};
use verity::{
    rules, Action, GameConfig, GenerationMode, OgreRule, PuzzleSession, ShapeAssignment,
    ShapeKind, Shuffler, Strategy, VolumeAssignment,
};

/// Plays and generates statue shape puzzles.
#[derive(Parser)]
#[command(name = "verity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    rules: RuleArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Rule switches shared by every subcommand.
#[derive(Args)]
struct RuleArgs {
    /// Start from the earlier rule set (pooled, legacy mixed, no expiry).
    #[arg(long, global = true)]
    legacy: bool,

    /// Correctness strategy: mixed, mixed-legacy, ideal-left, ideal-right.
    #[arg(long, global = true)]
    strategy: Option<Strategy>,

    /// Volume generation: pooled or paired.
    #[arg(long, global = true)]
    mode: Option<GenerationMode>,

    /// When ogres can be killed: all-cleared or undropped-empty.
    #[arg(long, global = true)]
    ogres: Option<OgreRule>,

    /// Dropped shapes cannot be left to expire.
    #[arg(long, global = true)]
    no_expiry: bool,

    /// Seed for reproducible puzzles.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show shapes and volumes as letters.
    #[arg(long, global = true)]
    letters: bool,
}

impl RuleArgs {
    fn config(&self) -> GameConfig {
        let mut config = if self.legacy {
            GameConfig::legacy()
        } else {
            GameConfig::default()
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(mode) = self.mode {
            config.generation = mode;
        }
        if let Some(ogres) = self.ogres {
            config.ogres = ogres;
        }
        if self.no_expiry {
            config.allow_expiry = false;
        }
        config.seed = self.seed;
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively on the terminal.
    Play,
    /// Print freshly generated puzzles.
    Generate {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Check whether volumes solve the given statue shapes.
    Check {
        /// Statue shapes, e.g. C,T,S.
        #[arg(long, value_parser = parse_shapes)]
        shapes: ShapeAssignment,
        /// Volumes by name or weight, e.g. cone,cube,2.
        #[arg(long, value_parser = parse_volumes)]
        volumes: VolumeAssignment,
    },
}

/// A line typed at the play prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Action(Action),
    Status,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  reset                 restore the starting volumes
  randomize             new shapes and volumes
  letters               toggle letters and names
  strategy <name>       mixed, mixed-legacy, ideal-left, ideal-right
  dissect <statue>      left, middle, right (or 1, 2, 3)
  drop <shape>          kill the knight carrying circle, triangle or square
  knight                kill the next knight
  pickup <n>            pick up dropped shape [n]
  expire <n>            let dropped shape [n] expire
  ogres                 kill the ogres for a new set of knights
  status                show the board
  quit";

fn parse_position(arg: &str) -> Option<usize> {
    match arg.to_ascii_lowercase().as_str() {
        "left" | "l" | "1" => Some(0),
        "middle" | "m" | "2" => Some(1),
        "right" | "r" | "3" => Some(2),
        _ => None,
    }
}

fn parse_input(line: &str) -> Result<Input, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Status);
    };
    let arg = words.next();

    let index = |command: &'static str| {
        arg.and_then(|arg| arg.parse::<usize>().ok())
            .ok_or(ParseError::Argument {
                command,
                expected: "an index such as 0",
            })
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "reset" => Input::Action(Action::Reset),
        "randomize" | "reroll" => Input::Action(Action::ResetAndRandomize),
        "letters" => Input::Action(Action::ToggleLetters),
        "strategy" => {
            let strategy = arg.ok_or(ParseError::Argument {
                command: "strategy",
                expected: "a strategy name",
            })?;
            Input::Action(Action::SetStrategy(strategy.parse()?))
        }
        "dissect" => {
            let position = arg.and_then(parse_position).ok_or(ParseError::Argument {
                command: "dissect",
                expected: "left, middle or right",
            })?;
            Input::Action(Action::Dissect(position))
        }
        "drop" => {
            let shape = arg.ok_or(ParseError::Argument {
                command: "drop",
                expected: "a shape",
            })?;
            Input::Action(Action::Drop(shape.parse::<ShapeKind>()?))
        }
        "knight" => Input::Action(Action::DropNext),
        "pickup" | "pick" => Input::Action(Action::PickUp(index("pickup")?)),
        "expire" => Input::Action(Action::LetExpire(index("expire")?)),
        "ogres" => Input::Action(Action::KillOgres),
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => return Err(ParseError::Command(command.to_string())),
    };
    Ok(input)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.rules.config();
    info!(?config, "starting");

    match cli.command {
        Some(Command::Generate { count }) => run_generate(config, count),
        Some(Command::Check { shapes, volumes }) => run_check(config, &shapes, &volumes),
        Some(Command::Play) | None => run_play(config, cli.rules.letters),
    }
}

/// Runs the interactive prompt until `quit` or end of input.
fn run_play(config: GameConfig, letters: bool) {
    let mut session = match PuzzleSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start a puzzle: {}", e);
            return;
        }
    };
    if letters {
        session.toggle_letters();
    }

    println!("Type 'help' for commands.");
    print!("{}", display::render(&session));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        };
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Status) => print!("{}", display::render(&session)),
            Ok(Input::Action(action)) => match session.apply(action) {
                Ok(()) => print!("{}", display::render(&session)),
                Err(e) => eprintln!("{}", e),
            },
            Err(e) => eprintln!("{}", e),
        }
        let _ = io::stdout().flush();
    }
}

/// Prints `count` generated puzzles, one per line.
fn run_generate(config: GameConfig, count: usize) {
    let mut shuffler = Shuffler::new(config.seed);
    let generator = config.generator();

    for _ in 0..count {
        let shapes = shuffler.shapes();
        match generator.generate(&mut shuffler, Some(&shapes), config.strategy) {
            Ok(volumes) => println!("{}", format_puzzle(&shapes, &volumes)),
            Err(e) => {
                eprintln!("Failed to generate: {}", e);
                return;
            }
        }
    }
}

/// Prints whether `volumes` solve `shapes` under the configured strategy.
fn run_check(config: GameConfig, shapes: &ShapeAssignment, volumes: &VolumeAssignment) {
    println!("{}", format_puzzle(shapes, volumes));
    for position in 0..shapes.len() {
        let correct = rules::is_correct_at(shapes, volumes, config.strategy, position);
        println!(
            "  {}: {}",
            shape_label(shapes[position], false),
            if correct { "ok" } else { "wrong" }
        );
    }
    if rules::is_correct(shapes, volumes, config.strategy) {
        println!("Correct! ({})", config.strategy);
    } else {
        println!("Incorrect ({})", config.strategy);
    }
}

fn format_puzzle(shapes: &ShapeAssignment, volumes: &VolumeAssignment) -> String {
    let shapes: Vec<String> = shapes.iter().map(|&shape| shape_label(shape, false)).collect();
    let volumes: Vec<String> = volumes
        .iter()
        .map(|&weight| volume_label(weight, false))
        .collect();
    format!("shapes: {}  volumes: {}", shapes.join(" "), volumes.join(" "))
}
