use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Machine-readable result on stdout.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable status on stderr, so stdout stays parseable.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green().bold(), msg);
}
