use anyhow::{Context, Result};
use tempus::{Local, Utc};

use crate::commands::{OutputArgs, parse_offset};

pub fn run(offset: Option<String>, utc: bool, output: OutputArgs) -> Result<()> {
    let now = Utc::now().context("Failed to read the system clock")?;
    match offset {
        Some(offset) => output.print(&now.to_fixed(parse_offset(&offset)?)?),
        None if utc => output.print(&now),
        None => {
            let local = now
                .with_timezone(&Local::host())
                .context("Failed to resolve the host offset")?;
            output.print(&local)
        }
    }
}
