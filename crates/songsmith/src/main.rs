//! Songsmith command-line front end
//!
//! Every command prints JSON to stdout; logs go to stderr and a daily file
//! under `~/.songsmith/logs`.

use clap::{Parser, Subcommand};
use songsmith_logging::{init_logging, logs_dir, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "songsmith", about = "Style, genre and compliance tooling for music prompts")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit a style descriptor into the budget and report on it
    Style {
        /// Comma-separated style text
        descriptor: String,
    },

    /// List conflicts between genres
    Genres {
        /// Genre names (1-5)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Run compliance checks on a prompt file
    Check {
        /// Prompt JSON file
        prompt: PathBuf,

        /// Compliance config (TOML)
        #[arg(short, long, env = "SONGSMITH_COMPLIANCE_CONFIG")]
        config: Option<PathBuf>,

        /// Apply the strict-mode penalty
        #[arg(long)]
        strict: bool,
    },

    /// Optimize a prompt file and store the result
    Optimize {
        /// Prompt JSON file
        prompt: PathBuf,

        /// Target style length (20-500)
        #[arg(short, long, default_value_t = songsmith_pipeline::DEFAULT_TARGET_LENGTH)]
        target: usize,

        /// Optimization mode: suno, general or creative
        #[arg(short, long, default_value = "suno")]
        mode: String,

        /// Directory for optimized prompts
        #[arg(long, env = "SONGSMITH_STORE")]
        store: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Style { descriptor } => cli::style::run(&descriptor),
        Commands::Genres { names } => cli::genres::run(&names),
        Commands::Check {
            prompt,
            config,
            strict,
        } => cli::check::run(cli::check::CheckArgs {
            prompt,
            config,
            strict,
        }),
        Commands::Optimize {
            prompt,
            target,
            mode,
            store,
        } => cli::optimize::run(cli::optimize::OptimizeArgs {
            prompt,
            target,
            mode,
            store,
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "songsmith",
        verbose: cli.verbose,
        log_dir: logs_dir(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optimize_defaults() {
        let cli = Cli::try_parse_from(["songsmith", "optimize", "prompt.json"]).unwrap();
        match cli.command {
            Commands::Optimize {
                target, mode, store, ..
            } => {
                assert_eq!(target, 120);
                assert_eq!(mode, "suno");
                assert!(store.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::try_parse_from([
            "songsmith",
            "-v",
            "check",
            "prompt.json",
            "--config",
            "rules.toml",
            "--strict",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check { strict: true, config: Some(_), .. }));
    }

    #[test]
    fn test_genres_requires_names() {
        assert!(Cli::try_parse_from(["songsmith", "genres"]).is_err());
    }
}
