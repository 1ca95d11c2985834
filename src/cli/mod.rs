//! CLI module for flexdb
//!
//! A command-line binding of the collection service:
//! - schema: create, get, list, update, delete, exists
//! - doc: create, get, list (with `--where` filters), update, delete

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DocAction, JsonInput, SchemaAction};
pub use commands::{execute, run};
pub use errors::{CliError, CliErrorCode, CliResult};
