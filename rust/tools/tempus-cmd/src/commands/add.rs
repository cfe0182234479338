use anyhow::{Context, Result};
use clap::Args;
use tempus::{Duration, DurationParts};

use crate::commands::{OutputArgs, parse_instant};

/// Span components; negative values shift backwards.
#[derive(Args, Debug, Default)]
pub struct SpanArgs {
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub weeks: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub days: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub hours: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub minutes: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub seconds: i64,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub millis: i64,
}

impl SpanArgs {
    fn to_duration(&self) -> Result<Duration> {
        Duration::from_parts(DurationParts {
            weeks: self.weeks,
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            milliseconds: self.millis,
            ..Default::default()
        })
        .context("Span is too large")
    }
}

pub fn run(instant: String, span: SpanArgs, output: OutputArgs) -> Result<()> {
    let start = parse_instant(&instant)?;
    let duration = span.to_duration()?;
    log::debug!("shifting {start:?} by {duration}");
    let shifted = start
        .checked_add_signed(duration)
        .with_context(|| format!("{instant} + {duration} is out of range"))?;
    output.print(&shifted)
}
