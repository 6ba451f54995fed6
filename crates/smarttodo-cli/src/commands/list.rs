use clap::Args;
use smarttodo_core::sort_by_importance;

use super::SnapshotArgs;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

pub fn run(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.load()?;
    let sorted = sort_by_importance(&snapshot.tasks);

    if args.snapshot.json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    if sorted.is_empty() {
        println!("No tasks yet - add one!");
        return Ok(());
    }

    for task in &sorted {
        let check = if task.completed { "x" } else { " " };
        let due = task
            .due_at
            .map(|due| format!("  Due: {}", due.format("%b %-d")))
            .unwrap_or_default();
        println!("[{check}] {:<40} {}{}", task.title, task.importance, due);
    }
    Ok(())
}
