use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use snakes_ladders_rs::cli::{TuiApp, narrate_move};
use snakes_ladders_rs::config::GameConfig;
use snakes_ladders_rs::dice::Dice;
use snakes_ladders_rs::game::{Game, GameError, Player};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "snakes-ladders-play")]
#[command(about = "Play Snakes & Ladders on the console")]
struct Args {
    /// JSON game configuration (board layout, settings, dice range)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible dice
    #[arg(long)]
    seed: Option<u64>,

    /// Player to add before the menu opens (repeatable)
    #[arg(short = 'p', long = "player")]
    players: Vec<String>,

    /// Skip the menu and start right away (needs --player)
    #[arg(long)]
    start: bool,

    /// Play in the full-screen board viewer instead of line mode
    #[arg(long)]
    tui: bool,
}

enum MenuOption {
    AddPlayer,
    StartGame,
    Exit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut game = config.build().unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    for name in &args.players {
        if let Err(err) = game.add_player(Player::new(name.as_str())) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if args.start {
        if let Err(err) = game.start() {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    } else if !run_menu(&mut game, &mut input) {
        return;
    }

    if args.tui {
        let mut app = TuiApp::new(game);
        if let Err(err) = app.run() {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        if let Some(winner) = app.game().winner() {
            println!("{} has won the game!", winner.name);
        }
    } else {
        play_line_mode(&mut game, &mut input);
    }
}

/// Returns true once the game has started, false if the user left.
fn run_menu(game: &mut Game<Dice>, input: &mut impl BufRead) -> bool {
    loop {
        println!("### SNAKES & LADDERS ###");
        println!();
        println!("1. Add player");
        println!("2. Start game");
        println!("3. EXIT");

        let Some(option) = read_menu_option(input) else {
            return false;
        };
        match option {
            MenuOption::AddPlayer => {
                if !add_player(game, input) {
                    return false;
                }
            }
            MenuOption::StartGame => match game.start() {
                Ok(()) => return true,
                Err(err) => println!("{err}"),
            },
            MenuOption::Exit => return false,
        }
        println!();
    }
}

fn read_menu_option(input: &mut impl BufRead) -> Option<MenuOption> {
    loop {
        print!("> ");
        let line = read_line(input)?;
        match line.trim().parse::<u8>() {
            Ok(1) => return Some(MenuOption::AddPlayer),
            Ok(2) => return Some(MenuOption::StartGame),
            Ok(3) => return Some(MenuOption::Exit),
            _ => println!("Invalid option"),
        }
    }
}

fn add_player(game: &mut Game<Dice>, input: &mut impl BufRead) -> bool {
    loop {
        print!("Player name: ");
        let Some(name) = read_line(input) else {
            return false;
        };
        match game.add_player(Player::new(name.trim())) {
            Ok(()) => return true,
            Err(err) => {
                println!("{err}");
                // A full game won't accept anyone, so stop asking.
                if matches!(err, GameError::CapacityExceeded { .. }) {
                    return true;
                }
            }
        }
    }
}

fn play_line_mode(game: &mut Game<Dice>, input: &mut impl BufRead) {
    println!();
    while !game.is_over() {
        match game.current_player() {
            Ok(player) => print!("{} it's your turn (press ENTER)", player.name),
            Err(err) => {
                eprintln!("Error: {err}");
                return;
            }
        }
        if read_line(input).is_none() {
            return;
        }

        match game.next_move() {
            Ok(result) => {
                for line in narrate_move(&result) {
                    println!("{line}");
                }
                println!();
            }
            Err(err) => {
                eprintln!("Error: {err}");
                return;
            }
        }
    }

    if let Some(winner) = game.winner() {
        println!("{} has won the game!", winner.name);
        println!();
    }
}

/// `None` on end of input.
fn read_line(input: &mut impl BufRead) -> Option<String> {
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
