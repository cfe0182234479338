use anyhow::Result;

use crate::commands::parse_instant;

pub fn run(start: String, end: String) -> Result<()> {
    let start = parse_instant(&start)?;
    let end = parse_instant(&end)?;
    let elapsed = end.signed_duration_since(&start);
    println!("{elapsed}");
    println!("total seconds: {}", elapsed.num_seconds());
    println!("total days:    {}", elapsed.num_days());
    Ok(())
}
