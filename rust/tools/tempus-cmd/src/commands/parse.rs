use anyhow::{Context, Result};
use tempus::DateTime;

use crate::commands::OutputArgs;

pub fn run(input: String, pattern: Option<String>, rfc2822: bool, output: OutputArgs) -> Result<()> {
    let dt = match (&pattern, rfc2822) {
        (Some(pattern), _) => DateTime::parse_from_str(&input, pattern)
            .with_context(|| format!("Failed to parse {input:?} with pattern {pattern:?}"))?,
        (None, true) => DateTime::parse_from_rfc2822(&input)
            .with_context(|| format!("Failed to parse {input:?} as RFC 2822"))?,
        (None, false) => DateTime::parse_from_rfc3339(&input)
            .with_context(|| format!("Failed to parse {input:?} as RFC 3339"))?,
    };
    log::debug!("parsed {input:?} as {dt:?}");
    output.print(&dt)
}
