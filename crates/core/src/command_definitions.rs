use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::arguments::Arguments;
use crate::error::Error::{EmptyName, NameWithWhitespace, NonUniqueArgumentTag};
use crate::error::Result;
use crate::registry::CommandRegistry;
use crate::session::SessionControl;
use crate::terminal::Terminal;

/// What a handler returns. Any error raised here is caught by the dispatcher
/// and reported to the operator; it never ends the session.
pub type HandlerResult = anyhow::Result<()>;

/// A command's behaviour, stored alongside its definition.
pub type Handler = Box<dyn Fn(&mut CommandContext<'_>) -> HandlerResult>;

/// Everything a handler may touch while it runs.
pub struct CommandContext<'a> {
    /// The final argument map, keyed by canonical lowercase tag.
    pub arguments: &'a Arguments,
    /// The registry the command was resolved from.
    pub registry: &'a CommandRegistry,
    /// Where operator-facing output goes.
    pub terminal: &'a mut dyn Terminal,
    control: &'a mut SessionControl,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        arguments: &'a Arguments,
        registry: &'a CommandRegistry,
        terminal: &'a mut dyn Terminal,
        control: &'a mut SessionControl,
    ) -> Self {
        Self {
            arguments,
            registry,
            terminal,
            control,
        }
    }

    /// Asks the session loop to stop once the current dispatch completes.
    pub fn request_stop(&mut self) {
        self.control.request_stop();
    }
}

/// A single declared argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
    tag: String,
    aliases: Vec<String>,
    description: String,
    input_format: Option<String>,
    required: bool,
}

impl CommandArgument {
    /// A required argument. Tags are stored lowercase.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            aliases: Vec::new(),
            description: String::new(),
            input_format: None,
            required: true,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_lowercase());
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Display hint shown in the command signature, e.g. `-port [number]`.
    #[must_use]
    pub fn input_format(mut self, input_format: &str) -> Self {
        self.input_format = Some(input_format.to_string());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_input_format(&self) -> Option<&str> {
        self.input_format.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// True if `key` (already lowercase) is this argument's tag or one of its aliases.
    pub fn answers_to(&self, key: &str) -> bool {
        self.tag == key || self.aliases.iter().any(|alias| alias == key)
    }
}

impl Display for CommandArgument {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.required {
            formatter.write_str("{")?;
        }

        write!(formatter, "-{}", self.tag)?;

        if let Some(input_format) = &self.input_format {
            write!(formatter, " [{input_format}]")?;
        }

        if !self.required {
            formatter.write_str("}")?;
        }

        Ok(())
    }
}

/// A named command: its arguments and the handler that runs it.
pub struct CommandDefinition {
    name: String,
    key: String,
    aliases: Vec<String>,
    description: String,
    arguments: Vec<CommandArgument>,
    handler: Handler,
}

impl CommandDefinition {
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> HandlerResult + 'static,
    {
        Self {
            name: name.to_string(),
            key: name.to_lowercase(),
            aliases: Vec::new(),
            description: String::new(),
            arguments: Vec::new(),
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_lowercase());
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn argument(mut self, argument: CommandArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// The name as registered, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lowercase name used for lookup and ranking.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[CommandArgument] {
        &self.arguments
    }

    pub fn required_arguments(&self) -> impl Iterator<Item = &CommandArgument> {
        self.arguments.iter().filter(|argument| argument.required)
    }

    /// Finds the declared argument that answers to `key` (tag or alias).
    pub fn find_argument(&self, key: &str) -> Option<&CommandArgument> {
        let key = key.to_lowercase();
        self.arguments.iter().find(|argument| argument.answers_to(&key))
    }

    /// True if `key` (already lowercase) is this command's name or one of its aliases.
    pub fn answers_to(&self, key: &str) -> bool {
        self.key == key || self.aliases.iter().any(|alias| alias == key)
    }

    /// The argument part of the signature, e.g. `-aa [value] {-bb}`.
    pub fn format(&self) -> String {
        self.arguments.iter().join(" ")
    }

    pub fn invoke(&self, context: &mut CommandContext<'_>) -> HandlerResult {
        (self.handler)(context)
    }

    /// Checks names and tags before the command is accepted into a registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a name, alias or tag is empty or contains
    /// whitespace, or if two arguments answer to the same tag.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        for alias in &self.aliases {
            validate_name(alias)?;
        }

        let mut seen: Vec<&str> = Vec::new();
        for argument in &self.arguments {
            for key in std::iter::once(&argument.tag).chain(argument.aliases.iter()) {
                validate_name(key)?;
                if seen.contains(&key.as_str()) {
                    return Err(NonUniqueArgumentTag(self.name.clone(), key.clone()));
                }
                seen.push(key);
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl Display for CommandDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.arguments.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} {}", self.name, self.format())
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(NameWithWhitespace(name.to_string()));
    }

    Ok(())
}
