use anyhow::{Context, Result};
use tempus::DateTime;

use crate::commands::{OutputArgs, parse_offset};

pub fn run(seconds: i64, nanos: u32, offset: Option<String>, output: OutputArgs) -> Result<()> {
    let dt = DateTime::from_timestamp(seconds, nanos)
        .with_context(|| format!("Timestamp {seconds}.{nanos:09} is out of range"))?;
    match offset {
        Some(offset) => output.print(&dt.to_fixed(parse_offset(&offset)?)?),
        None => output.print(&dt),
    }
}
