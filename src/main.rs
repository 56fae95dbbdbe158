use clap::Parser;
use todotree::cli::commands::Cli;
use todotree::cli::handlers;
use todotree::io::logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_file.as_deref()) {
        eprintln!("error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "exiting");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
