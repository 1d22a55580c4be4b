use clap::Parser;

use convention_guard::cli::Cli;
use convention_guard::commands;

fn main() {
    let cli = Cli::parse();
    std::process::exit(commands::run(&cli));
}
