//! Commands the sample host registers.

use anyhow::{bail, Context};
use crossterm::style::Color;
use ignite_core::command_definitions::{CommandArgument, CommandContext, CommandDefinition, HandlerResult};

/// Every demo command, in the order they appear in help.
pub fn commands() -> Vec<CommandDefinition> {
    vec![test_command(), greet_command(), add_command(), fail_command()]
}

pub fn test_command() -> CommandDefinition {
    CommandDefinition::new("Test", test)
        .description("Echoes its optional argument")
        .argument(
            CommandArgument::new("arg")
                .input_format("value")
                .optional()
                .description("Anything at all"),
        )
}

fn test(context: &mut CommandContext<'_>) -> HandlerResult {
    if let Some(value) = context.arguments.get("arg") {
        context.terminal.write_line(value)?;
    }
    Ok(())
}

pub fn greet_command() -> CommandDefinition {
    CommandDefinition::new("greet", greet)
        .alias("hello")
        .description("Greets someone by name")
        .argument(
            CommandArgument::new("name")
                .alias("n")
                .input_format("name")
                .description("Who to greet"),
        )
        .argument(
            CommandArgument::new("shout")
                .optional()
                .description("Greet loudly"),
        )
}

fn greet(context: &mut CommandContext<'_>) -> HandlerResult {
    let name = context.arguments.get("name").unwrap_or_default();

    if context.arguments.flag("shout") {
        let greeting = format!("HELLO {}!", name.to_uppercase());
        context.terminal.write_styled(&greeting, Color::Magenta, None)?;
    } else {
        context.terminal.write_line(&format!("Hello {name}!"))?;
    }

    Ok(())
}

pub fn add_command() -> CommandDefinition {
    CommandDefinition::new("add", add)
        .alias("sum")
        .description("Adds two integers")
        .argument(
            CommandArgument::new("a")
                .input_format("integer")
                .description("Left operand"),
        )
        .argument(
            CommandArgument::new("b")
                .input_format("integer")
                .description("Right operand"),
        )
}

fn add(context: &mut CommandContext<'_>) -> HandlerResult {
    let a = context.arguments.int("a")?.unwrap_or_default();
    let b = context.arguments.int("b")?.unwrap_or_default();
    let total = a.checked_add(b).context("The sum does not fit in 64 bits")?;

    context.terminal.write_line(&total.to_string())?;
    Ok(())
}

pub fn fail_command() -> CommandDefinition {
    CommandDefinition::new("fail", fail)
        .description("Always fails, to show that failures do not end the session")
        .argument(
            CommandArgument::new("reason")
                .input_format("text")
                .optional()
                .description("Message to fail with"),
        )
}

fn fail(context: &mut CommandContext<'_>) -> HandlerResult {
    match context.arguments.get("reason") {
        Some(reason) => bail!("{reason}"),
        None => bail!("Failed as requested"),
    }
}
