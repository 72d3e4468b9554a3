//! Commands every session gets unless the host defines its own.

use crossterm::style::Color;

use crate::command_definitions::{CommandContext, CommandDefinition, HandlerResult};
use crate::help;

pub const HELP: &str = "help";
pub const COLORS: &str = "colors";
pub const EXIT: &str = "exit";

/// Every colour the `colors` command demonstrates, with its display name.
pub const DISPLAY_COLORS: [(Color, &str); 16] = [
    (Color::Black, "Black"),
    (Color::DarkBlue, "DarkBlue"),
    (Color::DarkGreen, "DarkGreen"),
    (Color::DarkCyan, "DarkCyan"),
    (Color::DarkRed, "DarkRed"),
    (Color::DarkMagenta, "DarkMagenta"),
    (Color::DarkYellow, "DarkYellow"),
    (Color::Grey, "Grey"),
    (Color::DarkGrey, "DarkGrey"),
    (Color::Blue, "Blue"),
    (Color::Green, "Green"),
    (Color::Cyan, "Cyan"),
    (Color::Red, "Red"),
    (Color::Magenta, "Magenta"),
    (Color::Yellow, "Yellow"),
    (Color::White, "White"),
];

/// Shows single-command help when the first argument names a command,
/// otherwise help for everything.
pub fn help(context: &mut CommandContext<'_>) -> HandlerResult {
    let command = context
        .arguments
        .tags()
        .next()
        .and_then(|name| context.registry.lookup(name));

    let lines = match command {
        Some(command) => help::render_command(command),
        None => help::render_registry(context.registry),
    };

    help::write_lines(context.terminal, &lines)?;
    Ok(())
}

pub fn colors(context: &mut CommandContext<'_>) -> HandlerResult {
    for (color, name) in DISPLAY_COLORS {
        context.terminal.write_styled(name, color, None)?;
    }

    for (color, name) in DISPLAY_COLORS {
        context.terminal.write_styled(name, Color::Grey, Some(color))?;
    }

    Ok(())
}

pub fn exit(context: &mut CommandContext<'_>) -> HandlerResult {
    context.request_stop();
    Ok(())
}

pub fn help_command() -> CommandDefinition {
    CommandDefinition::new(HELP, help).description("Shows this list of commands")
}

pub fn colors_command() -> CommandDefinition {
    CommandDefinition::new(COLORS, colors)
        .description("Displays examples for all available console colors")
}

pub fn exit_command() -> CommandDefinition {
    CommandDefinition::new(EXIT, exit).description("Ends the session")
}
