//! Help text for one command or the whole registry.
//!
//! The layout is stable; tests compare it line for line.

use crossterm::style::Color;

use crate::command_definitions::CommandDefinition;
use crate::error::Result;
use crate::registry::CommandRegistry;
use crate::terminal::Terminal;

pub const USAGE_BANNER: &str = "HELP: cmd -arg [value] {-optionalArg [optional value]} {-optionalBool}";
pub const RULE: &str = "-----------------------------------------------------";

const SIGNATURE_COLOR: Color = Color::Green;
const DESCRIPTION_COLOR: Color = Color::Cyan;
const ARGUMENT_COLOR: Color = Color::DarkCyan;
const RULE_COLOR: Color = Color::Green;

/// A rendered help line and the colour it is shown in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub text: String,
    pub color: Option<Color>,
}

impl HelpLine {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: None,
        }
    }

    fn colored(text: String, color: Color) -> Self {
        Self {
            text,
            color: Some(color),
        }
    }
}

/// The signature line, e.g. `Test -aa [value] {-bb}`.
pub fn signature(command: &CommandDefinition) -> String {
    command.to_string()
}

/// Signature, description and one line per declared argument.
pub fn render_command(command: &CommandDefinition) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::colored(signature(command), SIGNATURE_COLOR),
        HelpLine::colored(format!("# {}", command.get_description()), DESCRIPTION_COLOR),
    ];

    lines.extend(command.arguments().iter().map(|argument| {
        HelpLine::colored(
            format!("| {} : {}", argument.tag(), argument.get_description()),
            ARGUMENT_COLOR,
        )
    }));

    lines
}

/// Usage banner, then every command separated by blank lines, between rules.
pub fn render_registry(registry: &CommandRegistry) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::plain(USAGE_BANNER),
        HelpLine::colored(RULE.to_string(), RULE_COLOR),
    ];

    for command in registry {
        lines.extend(render_command(command));
        lines.push(HelpLine::plain(""));
    }

    lines.push(HelpLine::colored(RULE.to_string(), RULE_COLOR));
    lines
}

/// Writes rendered help to `terminal`.
///
/// # Errors
///
/// Returns an error if the terminal cannot be written to.
pub fn write_lines(terminal: &mut dyn Terminal, lines: &[HelpLine]) -> Result<()> {
    for line in lines {
        match line.color {
            Some(color) => terminal.write_styled(&line.text, color, None)?,
            None => terminal.write_line(&line.text)?,
        }
    }
    Ok(())
}
