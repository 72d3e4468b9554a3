//! Ignite CLI Library
//!
//! The sample host for `ignite-core`. It registers a handful of demo commands
//! and runs them either interactively or from lines given on the command line.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and configuration overrides
//! - [`demo`]: The commands the sample host registers
//!
//! # Examples
//!
//! ```bash
//! # Interactive session
//! ignite
//!
//! # Run lines and exit
//! ignite -e "add -a 1 -b 2" -e "greet -name Ada -shout"
//!
//! # Without the optional built-ins, and with a custom prompt
//! ignite --no-colors --no-exit --prompt "ignite> "
//! ```

pub mod cli_args;
pub mod demo;
