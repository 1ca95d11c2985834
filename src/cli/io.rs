//! JSON I/O handling for CLI
//!
//! - Input: one JSON value from `--data`, `--file`, or stdin
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};

use serde_json::{json, Value};

use super::args::JsonInput;
use super::errors::{CliError, CliResult};

/// Read the JSON argument of a command
pub fn read_input(input: &JsonInput) -> CliResult<Value> {
    let text = match (&input.data, &input.file) {
        (Some(data), _) => data.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    parse_input(&text)
}

fn parse_input(text: &str) -> CliResult<Value> {
    if text.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }
    Ok(serde_json::from_str(text)?)
}

/// Write the one response line for a command outcome.
///
/// A failed outcome is written as an error body and handed back, so the
/// caller only has to pick the exit status.
pub fn write_outcome<W: Write>(writer: &mut W, outcome: CliResult<Value>) -> CliResult<()> {
    match outcome {
        Ok(data) => write_line(writer, &success_body(data)),
        Err(e) => {
            write_line(writer, &error_body(&e))?;
            Err(e)
        }
    }
}

fn success_body(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

fn error_body(err: &CliError) -> Value {
    let mut body = json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    if let Some(details) = err.details() {
        body["details"] = details.clone();
    }
    body
}

fn write_line<W: Write>(writer: &mut W, body: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, body)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
