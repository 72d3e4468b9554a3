//! Turns one input line into a command name and an argument map.
//!
//! Grammar: `<name> {-<tag> <value> | -<flag>}*`. Values run to the next
//! ` -` or the end of the line. There is no quoting or escaping.

use log::warn;
use thiserror::Error;

use crate::arguments::{Arguments, FLAG_VALUE};

/// Separates one argument token from the next.
pub const ARGUMENT_DELIMITER: &str = " -";

/// One line, split into a command name and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// The first token of the line, case preserved.
    pub command_name: String,
    pub arguments: Arguments,
}

impl ParsedInput {
    pub fn new(command_name: &str, arguments: Arguments) -> Self {
        Self {
            command_name: command_name.to_string(),
            arguments,
        }
    }
}

/// Why a line's arguments were thrown away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("nothing follows the space after the command name")]
    DanglingSpace,

    #[error("argument token `{}` has no tag", .0)]
    MissingTag(String),
}

/// Result of parsing a line.
///
/// A malformed argument list never fails the line: the command name is kept
/// and the arguments are dropped, and the outcome says so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Clean(ParsedInput),
    Degraded { input: ParsedInput, issue: ParseIssue },
}

impl ParseOutcome {
    pub fn input(&self) -> &ParsedInput {
        match self {
            ParseOutcome::Clean(input) | ParseOutcome::Degraded { input, .. } => input,
        }
    }

    pub fn into_input(self) -> ParsedInput {
        match self {
            ParseOutcome::Clean(input) | ParseOutcome::Degraded { input, .. } => input,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ParseOutcome::Degraded { .. })
    }
}

/// Parses a single, non-empty line with its newline already removed.
///
/// # Examples
///
/// ```
/// use ignite_core::parser::parse_line;
///
/// let input = parse_line("test -aa 1 -bb 2").into_input();
/// assert_eq!(input.command_name, "test");
/// assert_eq!(input.arguments.get("aa"), Some("1"));
/// assert_eq!(input.arguments.get("bb"), Some("2"));
/// ```
pub fn parse_line(line: &str) -> ParseOutcome {
    let Some((command_name, remainder)) = line.split_once(' ') else {
        return ParseOutcome::Clean(ParsedInput::new(line, Arguments::new()));
    };

    match parse_arguments(remainder) {
        Ok(arguments) => ParseOutcome::Clean(ParsedInput::new(command_name, arguments)),
        Err(issue) => {
            warn!("Ignoring arguments of `{line}`: {issue}");
            ParseOutcome::Degraded {
                input: ParsedInput::new(command_name, Arguments::new()),
                issue,
            }
        }
    }
}

fn parse_arguments(remainder: &str) -> Result<Arguments, ParseIssue> {
    if remainder.is_empty() {
        return Err(ParseIssue::DanglingSpace);
    }

    // The first token's dash is not preceded by a delimiter. A bare word
    // (`help test`) is accepted as a flag.
    let remainder = remainder.strip_prefix('-').unwrap_or(remainder);

    let mut arguments = Arguments::new();

    for token in remainder
        .split(ARGUMENT_DELIMITER)
        .filter(|token| !token.is_empty())
    {
        match token.split_once(' ') {
            Some(("", _)) => return Err(ParseIssue::MissingTag(token.to_string())),
            Some((tag, value)) => arguments.insert(tag, value),
            None => arguments.insert(token, FLAG_VALUE),
        };
    }

    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(line: &str) -> ParsedInput {
        match parse_line(line) {
            ParseOutcome::Clean(input) => input,
            ParseOutcome::Degraded { issue, .. } => panic!("`{line}` degraded: {issue}"),
        }
    }

    #[test]
    fn test_name_and_values() {
        let input = clean("test -aa 1 -bb 2");
        assert_eq!(input.command_name, "test");
        assert_eq!(input.arguments.len(), 2);
        assert_eq!(input.arguments.get("aa"), Some("1"));
        assert_eq!(input.arguments.get("bb"), Some("2"));
    }

    #[test]
    fn test_flag() {
        let input = clean("test -flag");
        assert_eq!(input.arguments.get("flag"), Some("true"));
        assert_eq!(input.arguments.len(), 1);
    }

    #[test]
    fn test_no_space_is_bare_command() {
        let input = clean("test");
        assert_eq!(input.command_name, "test");
        assert!(input.arguments.is_empty());
    }

    #[test]
    fn test_command_name_case_preserved_tags_lowercased() {
        let input = clean("Deploy -ENV prod -DryRun");
        assert_eq!(input.command_name, "Deploy");
        assert_eq!(input.arguments.tags().collect::<Vec<_>>(), vec!["env", "dryrun"]);
        assert_eq!(input.arguments.get("env"), Some("prod"));
    }

    #[test]
    fn test_values_keep_spaces_and_case() {
        let input = clean("say -text Hello Big World -to Bob");
        assert_eq!(input.arguments.get("text"), Some("Hello Big World"));
        assert_eq!(input.arguments.get("to"), Some("Bob"));
    }

    #[test]
    fn test_dash_inside_word_is_not_a_delimiter() {
        let input = clean("run -name my-service -env pre-prod");
        assert_eq!(input.arguments.get("name"), Some("my-service"));
        assert_eq!(input.arguments.get("env"), Some("pre-prod"));
    }

    #[test]
    fn test_duplicate_tag_last_write_wins() {
        let input = clean("test -aa 1 -AA 2");
        assert_eq!(input.arguments.len(), 1);
        assert_eq!(input.arguments.get("aa"), Some("2"));
    }

    #[test]
    fn test_bare_word_after_name_is_a_flag() {
        let input = clean("help Test");
        assert_eq!(input.command_name, "help");
        assert_eq!(input.arguments.get("test"), Some("true"));
    }

    #[test]
    fn test_trailing_dash_is_ignored() {
        let input = clean("test -");
        assert!(input.arguments.is_empty());

        let input = clean("test -aa 1 -");
        assert_eq!(input.arguments.get("aa"), Some("1"));
        assert_eq!(input.arguments.len(), 1);
    }

    #[test]
    fn test_dangling_space_degrades() {
        let outcome = parse_line("test ");
        assert!(outcome.is_degraded());
        assert_eq!(
            outcome,
            ParseOutcome::Degraded {
                input: ParsedInput::new("test", Arguments::new()),
                issue: ParseIssue::DanglingSpace,
            }
        );
    }

    #[test]
    fn test_token_without_tag_degrades_whole_line() {
        let outcome = parse_line("test -aa 1 - 5");
        match outcome {
            ParseOutcome::Degraded { input, issue } => {
                assert_eq!(input.command_name, "test");
                assert!(input.arguments.is_empty());
                assert_eq!(issue, ParseIssue::MissingTag(" 5".to_string()));
            }
            ParseOutcome::Clean(_) => panic!("expected a degraded parse"),
        }
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = parse_line("test -aa 1");
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.input().command_name, "test");
        assert_eq!(outcome.into_input().arguments.get("aa"), Some("1"));
    }
}
