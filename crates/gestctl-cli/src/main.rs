//! gestctl binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gestctl_cli::cli::{Cli, Commands};
use gestctl_cli::commands::{load_config, BindingsCommand, ClassifyCommand, ReplayCommand};
use gestctl_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), gestctl_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let config = load_config(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Classify(args) => {
            let cmd = ClassifyCommand::new(config);
            cmd.execute(&mut stdout, &format, &args)?;
        }
        Commands::Bindings => {
            let cmd = BindingsCommand::new(config);
            cmd.execute(&mut stdout, &format)?;
        }
        Commands::Replay(args) => {
            let cmd = ReplayCommand::new(config);
            cmd.execute(&mut stdout, &format, &args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestctl_cli::cli::Format;

    #[test]
    fn cli_parses_bindings() {
        let cli = Cli::parse_from(["gestctl", "bindings"]);
        assert!(matches!(cli.command, Commands::Bindings));
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["gestctl", "--format", "json", "bindings"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn run_classify_rejects_bad_pattern() {
        let cli = Cli::parse_from(["gestctl", "classify", "1,0,0"]);
        assert!(run(cli).is_err());
    }

    #[test]
    fn run_missing_config_fails() {
        let cli = Cli::parse_from(["gestctl", "--config", "/nonexistent/gestctl.toml", "bindings"]);
        assert!(run(cli).is_err());
    }
}
