use clap::Parser;
use ignite_cli::cli_args::Args;
use ignite_cli::demo;
use ignite_core::config;
use ignite_core::error::Result;
use ignite_core::session::Session;
use ignite_core::terminal::ConsoleTerminal;
use log::debug;
use std::process::ExitCode;

fn execute() -> Result<()> {
    let args = Args::parse();

    let config = args.apply_to(config::load_session_config(&args.config_path)?);
    debug!("Session config: {config:?}");

    let mut session = Session::new(demo::commands(), config, ConsoleTerminal::new())?;

    if args.lines.is_empty() {
        return session.run();
    }

    session.run_script(&args.lines)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
