use clap::Parser;
use randotrack::cli::commands::Cli;
use randotrack::cli::handlers;
use randotrack::io::logging;

fn main() {
    let cli = Cli::parse();

    // The TUI logs to a file once it knows where the state lives
    if cli.command.is_some() {
        logging::init_stderr();
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
