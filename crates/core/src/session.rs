//! The read, dispatch, report loop.

use log::{debug, info};

use crate::builtins;
use crate::command_definitions::CommandDefinition;
use crate::config::SessionConfig;
use crate::dispatch::{Dispatcher, Outcome};
use crate::error::Result;
use crate::parser::ParsedInput;
use crate::registry::CommandRegistry;
use crate::terminal::Terminal;

/// Typing this line ends the session, whether or not `exit` is registered.
pub const EXIT_LINE: &str = "exit";

/// The session's stop flag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionControl {
    stopped: bool,
}

impl SessionControl {
    pub fn request_stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// A running command session: the registry, the terminal and the stop flag.
pub struct Session<T: Terminal> {
    registry: CommandRegistry,
    terminal: T,
    control: SessionControl,
    config: SessionConfig,
}

impl<T: Terminal> Session<T> {
    /// Builds the registry from the host's commands plus the enabled
    /// built-ins. A built-in is skipped when the host already has a command
    /// answering to its name. Built-ins come first in the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if any host command fails validation.
    pub fn new(
        commands: impl IntoIterator<Item = CommandDefinition>,
        config: SessionConfig,
        terminal: T,
    ) -> Result<Self> {
        let commands: Vec<CommandDefinition> = commands.into_iter().collect();

        let mut builtin_commands = vec![builtins::help_command()];
        if config.enable_colors_command {
            builtin_commands.push(builtins::colors_command());
        }
        if config.enable_exit_command {
            builtin_commands.push(builtins::exit_command());
        }

        let mut registry = CommandRegistry::new();
        for builtin in builtin_commands {
            if commands.iter().any(|command| command.answers_to(builtin.key())) {
                debug!("Host defines `{}`, skipping the built-in", builtin.name());
                continue;
            }
            registry.register(builtin)?;
        }

        for command in commands {
            registry.register(command)?;
        }

        Ok(Self {
            registry,
            terminal,
            control: SessionControl::default(),
            config,
        })
    }

    /// Prompts, reads and dispatches lines until stopped, until the operator
    /// types `exit`, or until the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails. Handler errors never end the
    /// session.
    pub fn run(&mut self) -> Result<()> {
        info!("Session started with {} commands", self.registry.len());

        while !self.control.is_stopped() {
            self.terminal.write(&self.config.prompt)?;

            let Some(line) = self.terminal.read_line()? else {
                info!("Input closed, ending session");
                break;
            };

            if line == EXIT_LINE {
                break;
            }

            if line.is_empty() {
                continue;
            }

            self.dispatcher().dispatch_line(&line)?;
            self.terminal.write_line("")?;
        }

        info!("Session ended");
        Ok(())
    }

    /// Dispatches one raw line. Empty lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Outcome>> {
        if line.is_empty() {
            return Ok(None);
        }
        self.dispatcher().dispatch_line(line).map(Some)
    }

    /// Dispatches `lines` in order without prompting. Stops at the exit line
    /// or once a handler requests a stop, like [`Session::run`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn run_script<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            if line == EXIT_LINE {
                break;
            }

            info!("Executing `{line}`");
            self.run_line(line)?;

            if self.control.is_stopped() {
                break;
            }
        }

        Ok(())
    }

    /// Dispatches a command by name with already split arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn execute(&mut self, command_name: &str, arguments: &[(&str, &str)]) -> Result<Outcome> {
        let input = ParsedInput::new(command_name, arguments.iter().copied().collect());
        self.dispatcher().dispatch(input)
    }

    fn dispatcher(&mut self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry, &mut self.terminal, &mut self.control)
    }

    pub fn request_stop(&mut self) {
        self.control.request_stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.control.is_stopped()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }
}
