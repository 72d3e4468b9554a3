//! The terminal the session talks to.
//!
//! The engine never touches stdin/stdout directly. Everything goes through a
//! [`Terminal`], so hosts can swap the console for something else and tests
//! can script the operator.

use std::collections::VecDeque;
use std::io::{stdin, stdout, BufRead, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::error::Result;

/// Line-oriented operator I/O.
pub trait Terminal {
    /// Writes `text` without a line break, e.g. the prompt.
    fn write(&mut self, text: &str) -> Result<()>;

    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Writes `text` as one line in the given colours. `None` keeps the
    /// terminal's default background.
    fn write_styled(&mut self, text: &str, foreground: Color, background: Option<Color>) -> Result<()>;

    /// Blocks for one line. `None` means the input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>>;
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Stdin/stdout terminal with crossterm colours.
#[derive(Debug, Default)]
pub struct ConsoleTerminal;

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for ConsoleTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, Print(text))?;
        stdout.flush()?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, Print(text), Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    fn write_styled(&mut self, text: &str, foreground: Color, background: Option<Color>) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, SetForegroundColor(foreground))?;
        if let Some(background) = background {
            queue!(stdout, SetBackgroundColor(background))?;
        }
        // Reset before the line break so the background does not bleed into the next line
        queue!(stdout, Print(text), ResetColor, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        if stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(input)))
    }
}

/// One line of recorded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

/// In-memory terminal: answers reads from a script and records every write.
///
/// Text written with [`Terminal::write`] is held until the next line is
/// completed, so a prompt followed by a line shows up as one entry.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    output: Vec<OutputLine>,
    pending: String,
}

impl ScriptedTerminal {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            pending: String::new(),
        }
    }

    /// Queues another line of operator input.
    pub fn push_input(&mut self, line: &str) {
        self.input.push_back(line.to_string());
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    /// Recorded output text, one entry per line.
    pub fn lines(&self) -> Vec<&str> {
        self.output.iter().map(|line| line.text.as_str()).collect()
    }

    /// Text written since the last completed line.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of scripted lines not yet read.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    fn finish_line(&mut self, text: &str, foreground: Option<Color>, background: Option<Color>) {
        let mut line = std::mem::take(&mut self.pending);
        line.push_str(text);
        self.output.push(OutputLine {
            text: line,
            foreground,
            background,
        });
    }
}

impl Terminal for ScriptedTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        self.pending.push_str(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.finish_line(text, None, None);
        Ok(())
    }

    fn write_styled(&mut self, text: &str, foreground: Color, background: Option<Color>) -> Result<()> {
        self.finish_line(text, Some(foreground), background);
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.input.pop_front();
        // Echo the answer after the prompt, like a real console would show it
        if let Some(line) = &line {
            self.finish_line(line, None, None);
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("test\n".to_string()), "test");
        assert_eq!(strip_line_ending("test\r\n".to_string()), "test");
        assert_eq!(strip_line_ending("test -a 1 ".to_string()), "test -a 1 ");
        assert_eq!(strip_line_ending("\n".to_string()), "");
    }

    #[test]
    fn test_scripted_reads_in_order_then_ends() {
        let mut terminal = ScriptedTerminal::new(["first", "second"]);
        assert_eq!(terminal.remaining_input(), 2);
        assert_eq!(terminal.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(terminal.read_line().unwrap(), Some("second".to_string()));
        assert_eq!(terminal.read_line().unwrap(), None);
    }

    #[test]
    fn test_scripted_records_styles() {
        let mut terminal = ScriptedTerminal::default();
        terminal.write_line("plain").unwrap();
        terminal
            .write_styled("styled", Color::Red, Some(Color::Black))
            .unwrap();

        assert_eq!(terminal.lines(), vec!["plain", "styled"]);
        assert_eq!(terminal.output()[0].foreground, None);
        assert_eq!(terminal.output()[1].foreground, Some(Color::Red));
        assert_eq!(terminal.output()[1].background, Some(Color::Black));
    }

    #[test]
    fn test_scripted_prompt_joins_echoed_input() {
        let mut terminal = ScriptedTerminal::new(["help"]);
        terminal.write("> ").unwrap();
        assert_eq!(terminal.pending(), "> ");
        terminal.read_line().unwrap();

        assert_eq!(terminal.lines(), vec!["> help"]);
        assert_eq!(terminal.pending(), "");
    }

    #[test]
    fn test_scripted_push_input() {
        let mut terminal = ScriptedTerminal::new(Vec::<String>::new());
        terminal.push_input("Y");
        assert_eq!(terminal.read_line().unwrap(), Some("Y".to_string()));
    }
}
