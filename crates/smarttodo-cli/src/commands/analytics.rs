use clap::Args;
use smarttodo_core::Config;

use super::SnapshotArgs;

#[derive(Args)]
pub struct AnalyticsArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Show the tasks completed on this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

pub fn run(args: AnalyticsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.load()?;
    let config = Config::load_or_default();
    let report = config.aggregator().aggregate(&snapshot.tasks);

    if let Some(date) = args.date {
        let tasks = report.tasks_on(&date);
        if args.snapshot.json {
            println!("{}", serde_json::to_string_pretty(tasks)?);
        } else {
            println!("Tasks completed on {date}");
            for task in tasks {
                println!("  {} (Importance: {})", task.title, task.importance);
            }
        }
        return Ok(());
    }

    if args.snapshot.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
