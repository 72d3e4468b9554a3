//! Ignite Core Library
//!
//! An embeddable interactive command dispatch engine. The host registers
//! commands with typed argument declarations, and the engine reads lines from
//! the operator, resolves them against those commands and runs the matching
//! handler.
//!
//! # Key Features
//!
//! - **Command Registry**: Ordered commands with case-insensitive name and alias lookup
//! - **Line Parsing**: `name -tag value -flag` syntax with best-effort degradation
//! - **Fuzzy Correction**: Mistyped commands and argument tags are matched by edit distance and offered for confirmation
//! - **Built-in Commands**: `help`, and optionally `colors` and `exit`
//! - **Failure Containment**: Handler errors are reported, never fatal
//!
//! # Examples
//!
//! Running a session against a scripted terminal:
//!
//! ```
//! use ignite_core::command_definitions::{CommandArgument, CommandDefinition};
//! use ignite_core::config::SessionConfig;
//! use ignite_core::session::Session;
//! use ignite_core::terminal::{ScriptedTerminal, Terminal};
//!
//! let greet = CommandDefinition::new("greet", |context| {
//!     let name = context.arguments.get("name").unwrap_or("world").to_string();
//!     context.terminal.write_line(&format!("Hello {name}!"))?;
//!     Ok(())
//! })
//! .argument(CommandArgument::new("name").input_format("name"));
//!
//! let terminal = ScriptedTerminal::new(["greet -name Ada", "exit"]);
//! let mut session = Session::new([greet], SessionConfig::default(), terminal)?;
//! session.run()?;
//!
//! assert!(session.terminal().lines().contains(&"Hello Ada!"));
//! # Ok::<(), ignite_core::error::Error>(())
//! ```

pub mod arguments;
pub mod builtins;
pub mod command_definitions;
pub mod config;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod help;
pub mod parser;
pub mod registry;
pub mod session;
pub mod terminal;
