//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the sample host using
//! the `clap` crate. Flags given here override the session configuration file.

use clap::Parser;
use ignite_core::config::SessionConfig;

/// Command-line arguments for the `ignite` sample host.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use ignite_cli::cli_args::Args;
///
/// let args = Args::parse_from(["ignite", "--no-colors"]);
/// assert!(args.no_colors);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the session configuration YAML.
    ///
    /// If not provided, defaults to `~/.ignite/session.yml` when that file exists.
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,

    /// Do not register the `colors` command.
    #[arg(long, action)]
    pub no_colors: bool,

    /// Do not register the `exit` command. Typing `exit` still ends the session.
    #[arg(long, action)]
    pub no_exit: bool,

    /// Prompt written before each line is read.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Dispatch this line and exit instead of starting an interactive session.
    ///
    /// May be repeated; lines run in the order given.
    ///
    /// # Examples
    /// ```bash
    /// ignite -e "add -a 1 -b 2" -e "greet -name Ada"
    /// ```
    #[arg(long = "execute", short = 'e', action = clap::ArgAction::Append)]
    pub lines: Vec<String>,
}

impl Args {
    /// Applies command-line overrides on top of a loaded configuration.
    #[must_use]
    pub fn apply_to(&self, mut config: SessionConfig) -> SessionConfig {
        if self.no_colors {
            config.enable_colors_command = false;
        }

        if self.no_exit {
            config.enable_exit_command = false;
        }

        if let Some(prompt) = &self.prompt {
            config.prompt.clone_from(prompt);
        }

        config
    }
}
