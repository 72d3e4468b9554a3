//! Ordered command registry with case-insensitive lookup.

use log::warn;

use crate::command_definitions::CommandDefinition;
use crate::distance;
use crate::error::Result;

/// Commands in registration order.
///
/// Lookup matches the name or any alias, ignoring case, and the first match
/// in registration order wins. Registering a second command under a name that
/// is already taken is allowed but the later one is unreachable by that name.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `commands`, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn from_commands(commands: impl IntoIterator<Item = CommandDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for command in commands {
            registry.register(command)?;
        }
        Ok(registry)
    }

    /// Appends `command`. Does not deduplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the command's name, aliases or argument tags are
    /// malformed.
    pub fn register(&mut self, command: CommandDefinition) -> Result<()> {
        command.validate()?;

        for key in std::iter::once(command.key()).chain(command.aliases().iter().map(String::as_str)) {
            if let Some(existing) = self.lookup(key) {
                warn!(
                    "`{}` is already registered by command `{}`; `{}` will not be reachable by it",
                    key,
                    existing.name(),
                    command.name()
                );
            }
        }

        self.commands.push(command);
        Ok(())
    }

    /// Finds a command by name or alias, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&CommandDefinition> {
        let key = name.to_lowercase();
        self.commands.iter().find(|command| command.answers_to(&key))
    }

    /// The registered command names closest to `name`, by edit distance.
    ///
    /// Only canonical names are ranked, not aliases. Ties keep registration
    /// order. Returns `None` for an empty registry.
    pub fn closest(&self, name: &str) -> Option<(&CommandDefinition, usize)> {
        let key = name.to_lowercase();
        distance::closest(&key, self.commands.iter(), |command| command.key())
    }

    /// All commands in registration order.
    pub fn all(&self) -> &[CommandDefinition] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandRegistry {
    type Item = &'a CommandDefinition;
    type IntoIter = std::slice::Iter<'a, CommandDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_definitions::{CommandArgument, CommandContext, HandlerResult};

    fn noop(_: &mut CommandContext<'_>) -> HandlerResult {
        Ok(())
    }

    fn sample_registry() -> CommandRegistry {
        CommandRegistry::from_commands([
            CommandDefinition::new("help", noop).alias("?"),
            CommandDefinition::new("Test", noop)
                .alias("t")
                .alias("Check")
                .argument(CommandArgument::new("aa")),
            CommandDefinition::new("deploy", noop).alias("ship"),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_name_and_alias_any_case() {
        let registry = sample_registry();

        for command in registry.all() {
            let found = registry.lookup(command.name()).unwrap();
            assert!(std::ptr::eq(found, command));

            let found = registry.lookup(&command.name().to_uppercase()).unwrap();
            assert!(std::ptr::eq(found, command));

            for alias in command.aliases() {
                let found = registry.lookup(alias).unwrap();
                assert!(std::ptr::eq(found, command));

                let found = registry.lookup(&alias.to_uppercase()).unwrap();
                assert!(std::ptr::eq(found, command));
            }
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let registry = sample_registry();
        assert!(registry.lookup("missing").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_first_registered_wins() {
        let registry = CommandRegistry::from_commands([
            CommandDefinition::new("run", noop).description("first"),
            CommandDefinition::new("other", noop).alias("RUN"),
            CommandDefinition::new("Run", noop).description("second"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("run").unwrap().get_description(), "first");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let registry = sample_registry();
        let names: Vec<&str> = registry.iter().map(CommandDefinition::name).collect();
        assert_eq!(names, vec!["help", "Test", "deploy"]);
    }

    #[test]
    fn test_register_rejects_invalid_command() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(CommandDefinition::new("bad name", noop)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_closest_ranks_by_name() {
        let registry = sample_registry();
        let (command, score) = registry.closest("tset").unwrap();
        assert_eq!(command.name(), "Test");
        assert_eq!(score, 2);

        let (command, _) = registry.closest("DEPLY").unwrap();
        assert_eq!(command.name(), "deploy");
    }

    #[test]
    fn test_closest_tie_keeps_registration_order() {
        let registry = CommandRegistry::from_commands([
            CommandDefinition::new("cat", noop),
            CommandDefinition::new("bat", noop),
        ])
        .unwrap();

        let (command, score) = registry.closest("hat").unwrap();
        assert_eq!(command.name(), "cat");
        assert_eq!(score, 1);
    }

    #[test]
    fn test_closest_on_empty_registry() {
        assert!(CommandRegistry::new().closest("anything").is_none());
    }
}
