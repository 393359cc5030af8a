mod cli;
mod commands;
mod credential;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Err(e) = commands::report::run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
