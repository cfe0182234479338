//! Command implementations for tempus-cmd

use anyhow::{Context, Result};
use clap::Args;
use tempus::{DateTime, FixedOffset, SecondsFormat, TimeZone};

pub mod add;
pub mod diff;
pub mod from_timestamp;
pub mod now;
pub mod parse;

/// How an instant is printed.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// strftime-style output pattern
    #[arg(short, long, conflicts_with_all = ["rfc2822", "json"])]
    pub format: Option<String>,

    /// Print in RFC 2822 form
    #[arg(long, conflicts_with = "json")]
    pub rfc2822: bool,

    /// Print a JSON object with the instant's fields
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    pub fn render<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> Result<String> {
        if let Some(pattern) = &self.format {
            return dt
                .format(pattern)
                .with_context(|| format!("Failed to format with pattern {pattern:?}"));
        }
        if self.rfc2822 {
            return dt.to_rfc2822().context("Instant has no RFC 2822 form");
        }
        if self.json {
            let value = serde_json::json!({
                "rfc3339": dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                "timestamp": dt.timestamp(),
                "nanos": dt.timestamp_subsec_nanos(),
                "offset_seconds": dt.offset().local_minus_utc(),
                "weekday": dt.weekday().to_string(),
                "ordinal": dt.ordinal(),
                "iso_week": dt.iso_week().to_string(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }
        Ok(dt.to_rfc3339())
    }

    pub fn print<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> Result<()> {
        println!("{}", self.render(dt)?);
        Ok(())
    }
}

pub fn parse_offset(text: &str) -> Result<FixedOffset> {
    text.parse()
        .with_context(|| format!("Invalid offset {text:?}"))
}

pub fn parse_instant(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid RFC 3339 instant {text:?}"))
}
