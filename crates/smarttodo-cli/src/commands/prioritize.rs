use chrono::{DateTime, Utc};
use clap::Args;
use smarttodo_core::{Config, PriorityCalculator};

use super::SnapshotArgs;

#[derive(Args)]
pub struct PrioritizeArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Evaluate due dates as of this RFC 3339 time instead of now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

pub fn run(args: PrioritizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.load()?;
    let config = Config::load_or_default();
    let now = args.now.unwrap_or_else(Utc::now);

    let calculator = PriorityCalculator::with_config(config.priority_config(now));
    let ranked = calculator.prioritize(&snapshot.tasks);

    if args.snapshot.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    println!("Recommended Order");
    if ranked.is_empty() {
        println!("  Nothing open.");
    }
    for (position, scored) in ranked.iter().enumerate() {
        let task = &scored.task;
        let due = task
            .due_at
            .map(|due| format!(" | Due: {}", due.format("%d %b")))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<40} Score: {:.0}  (Importance: {}{})",
            position + 1,
            task.title,
            scored.score,
            task.importance,
            due
        );
    }
    Ok(())
}
