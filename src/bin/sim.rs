use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use snakes_ladders_rs::cli::StatisticsAccumulator;
use snakes_ladders_rs::config::GameConfig;
use snakes_ladders_rs::game::{GameError, Player, TURNS_LIMIT};
use snakes_ladders_rs::types::AdornmentKind;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "snakes-ladders-sim")]
#[command(about = "Snakes & Ladders Simulator - auto-play many games and summarize them")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 100)]
    num: u32,

    /// Number of players per game
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON game configuration (board layout, settings, dice range)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Moves after which a game is abandoned
    #[arg(long, default_value_t = TURNS_LIMIT)]
    turn_limit: u32,

    /// Silence per-game output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let base_config = match &args.config {
        Some(path) => GameConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => GameConfig::default(),
    };

    let mut stats = StatisticsAccumulator::new();
    for game_idx in 0..args.num {
        if let Err(err) = run_game(&args, &base_config, game_idx, &mut stats) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }

    print_summary(&args, &stats);
}

fn run_game(
    args: &Args,
    base_config: &GameConfig,
    game_idx: u32,
    stats: &mut StatisticsAccumulator,
) -> Result<(), GameError> {
    let config = GameConfig {
        seed: Some(game_seed(args.seed, game_idx)),
        ..base_config.clone()
    };
    let mut game = config.build()?;
    for seat in 0..args.players {
        game.add_player(Player::new(format!("P{}", seat + 1)))?;
    }

    let start = Instant::now();
    game.start()?;
    while !game.is_over() && game.turn() < args.turn_limit {
        let result = game.next_move()?;
        stats.on_move(&result);
    }
    let duration = start.elapsed();
    stats.after(&game, duration);

    if !game.is_over() {
        warn!(game = game_idx + 1, turns = game.turn(), "turn limit reached");
    }

    if !args.quiet {
        let last_n = 10;
        if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
            let winner = game
                .winner()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "None".to_string());
            println!(
                "Game {:>4}: Winner={:>6}, Turns={:>5}, Duration={:?}",
                game_idx + 1,
                winner,
                game.turn(),
                duration
            );
        } else if (game_idx + 1) % 100 == 0 {
            print!(".");
            let _ = std::io::stdout().flush();
        }
    }
    Ok(())
}

/// Per-game seed; wraps so any `--seed` is accepted.
fn game_seed(base: u64, game_idx: u32) -> u64 {
    base.wrapping_add(u64::from(game_idx))
}

fn print_summary(args: &Args, acc: &StatisticsAccumulator) {
    let stats = &acc.stats;
    println!("\n{}", "=".repeat(60));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(60));

    println!("\nSeat Summary:");
    println!("{:<10} {:<10} {:<12}", "Seat", "Wins", "Win Rate");
    println!("{}", "-".repeat(34));
    for seat in 0..args.players {
        let wins = stats.wins.get(&seat).copied().unwrap_or(0);
        let win_rate = if stats.games > 0 {
            (f64::from(wins) / f64::from(stats.games)) * 100.0
        } else {
            0.0
        };
        println!("{:<10} {:<10} {:<11.1}%", format!("P{}", seat + 1), wins, win_rate);
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.games);
    println!("  Unfinished: {}", stats.unfinished);
    println!("  Avg Turns: {:.2}", stats.get_avg_turns());
    println!("  Wasted Rolls: {}", stats.wasted_rolls);
    println!("  Shortcuts Taken: {}", stats.hops_of(AdornmentKind::Shortcut));
    println!("  Setbacks Taken: {}", stats.hops_of(AdornmentKind::Setback));
    println!("  Longest Chain: {}", stats.longest_chain);
    println!("  Avg Duration: {:.2?}", stats.get_avg_duration());
}
