use clap::Parser;
use game2048::config::{GameConfig, DEFAULT_SIZE, DEFAULT_TARGET_SCORE};
use game2048::grid::Direction;
use game2048::session::Session;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Grid size (e.g. 4 for 4x4)
    #[clap(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Tile value that wins the game; must be a power of 2
    #[clap(short, long, default_value_t = DEFAULT_TARGET_SCORE)]
    target: u32,

    /// Disable undo
    #[clap(long)]
    no_undo: bool,

    /// Seed for tile spawns, for a reproducible game
    #[clap(long)]
    seed: Option<u64>,
}

enum Command {
    Move(Direction),
    Undo,
    Restart,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.to_ascii_lowercase().as_str() {
        "w" | "up" => Some(Command::Move(Direction::Up)),
        "a" | "left" => Some(Command::Move(Direction::Left)),
        "s" | "down" => Some(Command::Move(Direction::Down)),
        "d" | "right" => Some(Command::Move(Direction::Right)),
        "u" => Some(Command::Undo),
        "r" => Some(Command::Restart),
        "q" => Some(Command::Quit),
        _ => None,
    }
}

enum WinChoice {
    Continue,
    Restart,
    Quit,
}

fn parse_win_choice(input: &str) -> Option<WinChoice> {
    match input.to_ascii_lowercase().as_str() {
        "c" | "continue" => Some(WinChoice::Continue),
        "r" | "restart" => Some(WinChoice::Restart),
        "q" => Some(WinChoice::Quit),
        _ => None,
    }
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(input.trim().to_string()))
}

fn run(session: &mut Session) -> io::Result<()> {
    loop {
        println!("---------------------");
        println!("Score: {}", session.score());
        println!("{}", session.grid());

        if session.win_pending() {
            println!();
            println!("🎉 You reached {}! 🎉", session.config().target_score());
            let line = match prompt("Continue playing (c), restart (r) or quit (q)? ")? {
                Some(line) => line,
                None => return Ok(()),
            };
            match parse_win_choice(&line) {
                Some(WinChoice::Continue) => session.acknowledge_win_and_continue(),
                Some(WinChoice::Restart) => session.restart(),
                Some(WinChoice::Quit) => {
                    println!("Thanks for playing!");
                    return Ok(());
                }
                None => println!("Please answer 'c', 'r' or 'q'."),
            }
            continue;
        }

        if session.is_lost() {
            println!();
            println!("Game over! Final score: {}", session.score());
        }

        let undo_hint = if session.config().undo_enabled() {
            ", 'u' to undo"
        } else {
            ""
        };
        let line = match prompt(&format!(
            "Move with w/a/s/d{}, 'r' to restart, 'q' to quit: ",
            undo_hint
        ))? {
            Some(line) => line,
            None => return Ok(()),
        };

        match parse_command(&line) {
            Some(Command::Move(direction)) => {
                if session.is_lost() {
                    println!("No moves left. Undo or restart.");
                } else if !session.apply_move(direction).changed {
                    println!("Nothing moves that way.");
                }
            }
            Some(Command::Undo) => {
                if !session.config().undo_enabled() {
                    println!("Undo is disabled for this game.");
                } else if !session.undo() {
                    println!("Nothing to undo.");
                }
            }
            Some(Command::Restart) => session.restart(),
            Some(Command::Quit) => {
                println!("Thanks for playing!");
                return Ok(());
            }
            None => println!("Invalid input '{}'.", line),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match GameConfig::new(args.size, args.target, !args.no_undo) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::from_entropy(config),
    };

    println!("Welcome to 2048!");
    if let Err(e) = run(&mut session) {
        eprintln!("Error reading input: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
