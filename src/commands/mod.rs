pub mod check;
pub mod context;
pub mod i18n;
pub mod init;
pub mod template;

pub use check::run_check;
pub use i18n::run_i18n;
pub use init::run_init;
pub use template::run_template;

use crate::cli::{Cli, Commands};

/// Dispatch a parsed command line; returns the process exit code.
#[must_use]
pub fn run(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Check(args) => run_check(args, cli),
        Commands::I18n(args) => run_i18n(args, cli),
        Commands::Init(args) => run_init(args, cli),
        Commands::Template(args) => run_template(args, cli),
    }
}
