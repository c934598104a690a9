//! Output handling for one-shot commands
//!
//! Results go to stdout, one JSON document per command. Logs go to stderr.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a JSON document to stdout, pretty-printed
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write raw bytes to stdout (report bodies, non-JSON replies)
pub fn write_raw(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(bytes)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
