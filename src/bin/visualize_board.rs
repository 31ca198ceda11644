use std::path::PathBuf;

use clap::Parser;
use snakes_ladders_rs::cli::board_display::{print_board, render_legend};
use snakes_ladders_rs::cli::kind_label;
use snakes_ladders_rs::config::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "snakes-ladders-board")]
#[command(about = "Print a Snakes & Ladders board layout")]
struct Args {
    /// JSON game configuration; the standard board is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => GameConfig::default(),
    };

    let board = config.board.build().unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    print_board(&board);
    println!();
    println!("{}", render_legend(&board));
    println!();
    for adornment in board.adornments() {
        println!(
            "{:<7} {:>3} -> {:>3}",
            kind_label(adornment.kind),
            adornment.start,
            adornment.end
        );
    }
}
