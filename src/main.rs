use std::path::Path;

use clap::Parser;
use syllabus::cli::commands::Cli;
use syllabus::cli::handlers;
use syllabus::io::store::resolve_data_dir;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let data_dir = resolve_data_dir(cli.data_dir.as_deref().map(Path::new));
            if let Err(e) = syllabus::tui::run(&data_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
