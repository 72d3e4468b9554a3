//! Resolves parsed input to a command and runs it.
//!
//! Each dispatch walks the same path: look the command up, offer the closest
//! name if that fails, check required arguments and offer tag corrections if
//! any are missing, then run the handler and report how it went. Whenever the
//! operator turns a suggestion down, help runs instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::anyhow;
use crossterm::style::Color;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::arguments::{Arguments, FLAG_VALUE};
use crate::builtins;
use crate::command_definitions::{CommandContext, CommandDefinition};
use crate::distance;
use crate::error::Result;
use crate::parser::{self, ParsedInput};
use crate::registry::CommandRegistry;
use crate::session::SessionControl;
use crate::terminal::Terminal;

/// The only answer that accepts a suggestion.
pub const ACCEPT_ANSWER: &str = "Y";

const CONFIRM_PROMPT: &str = "Enter Y to accept: ";
const SUGGESTION_COLOR: Color = Color::Yellow;
const FAILURE_COLOR: Color = Color::Red;

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler returned normally.
    Completed { command: String, elapsed: Duration },
    /// The handler returned an error; `message` is what the operator saw.
    Failed { command: String, message: String },
}

impl Outcome {
    /// Name of the command that actually ran.
    pub fn command(&self) -> &str {
        match self {
            Outcome::Completed { command, .. } | Outcome::Failed { command, .. } => command,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }
}

/// Proposed replacement of unknown argument tags with declared ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remap {
    /// The argument map with every substitution applied.
    pub arguments: Arguments,
    /// `(typed tag, declared tag)` pairs, in the order they were typed.
    pub substitutions: Vec<(String, String)>,
}

/// Maps every supplied tag the command does not declare onto the closest
/// declared tag. Tags that are already declared are left alone.
pub fn propose_remap(command: &CommandDefinition, arguments: &Arguments) -> Remap {
    let substitutions: Vec<(String, String)> = arguments
        .tags()
        .filter(|tag| command.find_argument(tag).is_none())
        .filter_map(|tag| {
            distance::closest(tag, command.arguments(), |argument| argument.tag())
                .map(|(argument, _)| (tag.to_string(), argument.tag().to_string()))
        })
        .collect();

    let mut remapped = arguments.clone();
    for (typed, declared) in &substitutions {
        if let Some(value) = remapped.remove(typed) {
            remapped.insert(declared, &value);
        }
    }

    Remap {
        arguments: remapped,
        substitutions,
    }
}

/// Required tags of `command` that `arguments` does not supply.
pub fn missing_tags<'c>(command: &'c CommandDefinition, arguments: &Arguments) -> Vec<&'c str> {
    command
        .required_arguments()
        .map(|argument| argument.tag())
        .filter(|tag| !arguments.contains(tag))
        .collect()
}

/// Rewrites argument aliases to their canonical tags, in input order, so a
/// later value for the same argument overwrites an earlier one whichever
/// spelling each used.
fn canonicalize(command: &CommandDefinition, arguments: &Arguments) -> Arguments {
    arguments
        .iter()
        .map(|(tag, value)| match command.find_argument(tag) {
            Some(argument) if argument.tag() != tag => {
                debug!("Argument alias `{tag}` resolved to `{}`", argument.tag());
                (argument.tag(), value)
            }
            _ => (tag, value),
        })
        .collect()
}

/// Text of a panic payload, for the two payload types `panic!` produces.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs one dispatch at a time against a registry.
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    terminal: &'a mut dyn Terminal,
    control: &'a mut SessionControl,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        terminal: &'a mut dyn Terminal,
        control: &'a mut SessionControl,
    ) -> Self {
        Self {
            registry,
            terminal,
            control,
        }
    }

    /// Parses and dispatches one raw line.
    ///
    /// # Errors
    ///
    /// Only terminal failures are returned. Handler errors are reported to
    /// the operator and come back as [`Outcome::Failed`].
    pub fn dispatch_line(&mut self, line: &str) -> Result<Outcome> {
        let input = parser::parse_line(line).into_input();
        self.dispatch(input)
    }

    /// Dispatches already parsed input.
    ///
    /// # Errors
    ///
    /// Only terminal failures are returned.
    pub fn dispatch(&mut self, input: ParsedInput) -> Result<Outcome> {
        debug!("Dispatching {input:?}");

        let ParsedInput {
            command_name,
            arguments,
        } = input;

        let registry = self.registry;
        let command = match registry.lookup(&command_name) {
            Some(command) => Some(command),
            None => self.suggest_command(&command_name, &arguments)?,
        };

        let Some(command) = command else {
            return self.run_help(None);
        };

        match self.validate(command, arguments)? {
            Some(arguments) => self.execute(command, &arguments),
            None => self.run_help(Some(command)),
        }
    }

    /// Offers the closest registered command in place of an unknown one.
    fn suggest_command(
        &mut self,
        command_name: &str,
        arguments: &Arguments,
    ) -> Result<Option<&'a CommandDefinition>> {
        let registry = self.registry;
        let Some((suggestion, score)) = registry.closest(command_name) else {
            debug!("No commands registered to suggest in place of `{command_name}`");
            return Ok(None);
        };

        debug!(
            "Closest command to `{command_name}` is `{}` at distance {score}",
            suggestion.name()
        );

        let proposal = if arguments.is_empty() {
            suggestion.name().to_string()
        } else {
            format!("{} {arguments}", suggestion.name())
        };

        let question = format!("Unknown command `{command_name}`. Did you mean `{proposal}`?");
        if self.confirm(&question)? {
            info!("Running `{}` in place of `{command_name}`", suggestion.name());
            Ok(Some(suggestion))
        } else {
            Ok(None)
        }
    }

    /// Returns the final arguments, or `None` if help should run instead.
    fn validate(
        &mut self,
        command: &CommandDefinition,
        arguments: Arguments,
    ) -> Result<Option<Arguments>> {
        let mut arguments = canonicalize(command, &arguments);

        loop {
            let missing = missing_tags(command, &arguments);
            if missing.is_empty() {
                return Ok(Some(arguments));
            }

            debug!("`{}` is missing {missing:?}", command.name());

            if arguments.is_empty() {
                return Ok(None);
            }

            let remap = propose_remap(command, &arguments);
            let question = format!(
                "`{}` is missing {}. Did you mean `{} {}`?",
                command.name(),
                missing.iter().map(|tag| format!("-{tag}")).join(", "),
                command.name(),
                remap.arguments
            );

            if !self.confirm(&question)? {
                return Ok(None);
            }

            // Accepting a proposal that changes nothing would ask the same question forever
            if remap.substitutions.is_empty() {
                debug!("Nothing to remap for `{}`", command.name());
                return Ok(None);
            }

            info!("Remapped arguments of `{}`: {:?}", command.name(), remap.substitutions);
            arguments = remap.arguments;
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.terminal.write_styled(question, SUGGESTION_COLOR, None)?;
        self.terminal.write(CONFIRM_PROMPT)?;
        let answer = self.terminal.read_line()?;
        Ok(answer.as_deref() == Some(ACCEPT_ANSWER))
    }

    /// Runs help, scoped to `about` when a command was resolved.
    fn run_help(&mut self, about: Option<&CommandDefinition>) -> Result<Outcome> {
        let mut arguments = Arguments::new();
        if let Some(command) = about {
            arguments.insert(command.key(), FLAG_VALUE);
        }

        let registry = self.registry;
        match registry.lookup(builtins::HELP) {
            Some(help) => self.execute(help, &arguments),
            None => self.execute(&builtins::help_command(), &arguments),
        }
    }

    fn execute(&mut self, command: &CommandDefinition, arguments: &Arguments) -> Result<Outcome> {
        info!("Running `{}` with {arguments:?}", command.name());

        let started = Instant::now();
        let result = {
            let mut context =
                CommandContext::new(arguments, self.registry, &mut *self.terminal, &mut *self.control);
            panic::catch_unwind(AssertUnwindSafe(|| command.invoke(&mut context))).unwrap_or_else(
                |payload| Err(anyhow!("Handler panicked: {}", panic_message(payload.as_ref()))),
            )
        };
        let elapsed = started.elapsed();

        match result {
            Ok(()) => {
                self.terminal
                    .write_line(&format!("{}ms", elapsed.as_millis()))?;
                Ok(Outcome::Completed {
                    command: command.name().to_string(),
                    elapsed,
                })
            }
            Err(error) => {
                let message = format!("{error:#}");
                warn!("Command `{}` failed: {message}", command.name());
                self.terminal.write_styled(&message, FAILURE_COLOR, None)?;
                Ok(Outcome::Failed {
                    command: command.name().to_string(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_definitions::{CommandArgument, HandlerResult};
    use crate::help::{RULE, USAGE_BANNER};
    use crate::terminal::ScriptedTerminal;

    fn noop(_: &mut CommandContext<'_>) -> HandlerResult {
        Ok(())
    }

    fn test_command() -> CommandDefinition {
        CommandDefinition::new("Test", noop)
            .argument(CommandArgument::new("aa").alias("alpha"))
            .argument(CommandArgument::new("bb"))
            .argument(CommandArgument::new("cc").optional())
    }

    fn args(pairs: &[(&str, &str)]) -> Arguments {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_missing_tags() {
        let command = test_command();
        assert_eq!(missing_tags(&command, &args(&[])), vec!["aa", "bb"]);
        assert_eq!(missing_tags(&command, &args(&[("aa", "1")])), vec!["bb"]);
        assert!(missing_tags(&command, &args(&[("aa", "1"), ("bb", "2")])).is_empty());
    }

    #[test]
    fn test_optional_arguments_are_never_missing() {
        let command = test_command();
        let missing = missing_tags(&command, &args(&[("aa", "1"), ("bb", "2")]));
        assert!(!missing.contains(&"cc"));
    }

    #[test]
    fn test_propose_remap_fixes_typos() {
        let command = test_command();
        let remap = propose_remap(&command, &args(&[("aa", "1"), ("bx", "2")]));

        assert_eq!(remap.substitutions, vec![("bx".to_string(), "bb".to_string())]);
        assert_eq!(remap.arguments.get("aa"), Some("1"));
        assert_eq!(remap.arguments.get("bb"), Some("2"));
        assert!(!remap.arguments.contains("bx"));
    }

    #[test]
    fn test_propose_remap_keeps_declared_tags_and_aliases() {
        let command = test_command();
        let remap = propose_remap(&command, &args(&[("alpha", "1"), ("cc", "x")]));

        assert!(remap.substitutions.is_empty());
        assert_eq!(remap.arguments, args(&[("alpha", "1"), ("cc", "x")]));
    }

    #[test]
    fn test_propose_remap_overwrites_on_collision() {
        let command = test_command();
        let remap = propose_remap(&command, &args(&[("bb", "2"), ("bx", "9")]));

        assert_eq!(remap.arguments.len(), 1);
        assert_eq!(remap.arguments.get("bb"), Some("9"));
    }

    #[test]
    fn test_propose_remap_without_declared_arguments() {
        let command = CommandDefinition::new("bare", noop);
        let remap = propose_remap(&command, &args(&[("x", "1")]));

        assert!(remap.substitutions.is_empty());
        assert_eq!(remap.arguments.get("x"), Some("1"));
    }

    #[test]
    fn test_canonicalize_resolves_aliases() {
        let command = test_command();
        let arguments = canonicalize(&command, &args(&[("ALPHA", "1"), ("bb", "2")]));

        assert_eq!(arguments.get("aa"), Some("1"));
        assert!(!arguments.contains("alpha"));
        assert_eq!(arguments.get("bb"), Some("2"));
    }

    #[test]
    fn test_outcome_accessors() {
        let completed = Outcome::Completed {
            command: "Test".to_string(),
            elapsed: Duration::from_millis(3),
        };
        let failed = Outcome::Failed {
            command: "boom".to_string(),
            message: "bad".to_string(),
        };

        assert_eq!(completed.command(), "Test");
        assert!(completed.is_success());
        assert_eq!(failed.command(), "boom");
        assert!(!failed.is_success());
    }

    #[test]
    fn test_canonicalize_keeps_last_value_across_spellings() {
        let command = test_command();

        let arguments = canonicalize(&command, &args(&[("alpha", "first"), ("aa", "second")]));
        assert_eq!(arguments.get("aa"), Some("second"));
        assert_eq!(arguments.len(), 1);

        let arguments = canonicalize(&command, &args(&[("aa", "first"), ("alpha", "second")]));
        assert_eq!(arguments.get("aa"), Some("second"));
        assert_eq!(arguments.len(), 1);
    }

    #[test]
    fn test_panic_message() {
        let from_str: Box<dyn Any + Send> = Box::new("static text");
        let from_string: Box<dyn Any + Send> = Box::new(String::from("formatted text"));
        let other: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(from_str.as_ref()), "static text");
        assert_eq!(panic_message(from_string.as_ref()), "formatted text");
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_panicking_handler_fails_the_dispatch() {
        let registry = CommandRegistry::from_commands([CommandDefinition::new("boom", |_| {
            panic!("handler blew up")
        })])
        .unwrap();
        let mut terminal = ScriptedTerminal::default();
        let mut control = SessionControl::default();

        let outcome = Dispatcher::new(&registry, &mut terminal, &mut control)
            .dispatch_line("boom")
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Failed {
                command: "boom".to_string(),
                message: "Handler panicked: handler blew up".to_string(),
            }
        );
        let last = terminal.output().last().unwrap();
        assert_eq!(last.text, "Handler panicked: handler blew up");
        assert_eq!(last.foreground, Some(FAILURE_COLOR));
        assert!(!control.is_stopped());
    }

    #[test]
    fn test_empty_registry_substitutes_help() {
        let registry = CommandRegistry::new();
        let mut terminal = ScriptedTerminal::new(["Y"]);
        let mut control = SessionControl::default();

        let outcome = Dispatcher::new(&registry, &mut terminal, &mut control)
            .dispatch_line("anything -a 1")
            .unwrap();

        assert_eq!(outcome.command(), "help");
        assert!(outcome.is_success());
        // Nothing to suggest, so no confirmation is asked for
        assert_eq!(terminal.remaining_input(), 1);

        let lines = terminal.lines();
        assert_eq!(&lines[..3], &[USAGE_BANNER, RULE, RULE]);
        assert!(lines[3].ends_with("ms"));
    }
}
