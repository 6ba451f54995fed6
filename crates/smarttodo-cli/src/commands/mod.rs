pub mod analytics;
pub mod config;
pub mod list;
pub mod prioritize;

use std::path::PathBuf;

use clap::Args;
use smarttodo_core::{snapshot, TaskSnapshot};

/// Where to read the task snapshot from.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Task snapshot JSON file, or `-` for stdin
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SnapshotArgs {
    pub fn load(&self) -> Result<TaskSnapshot, Box<dyn std::error::Error>> {
        let snapshot = if self.file.as_os_str() == "-" {
            snapshot::from_reader(std::io::stdin().lock())?
        } else {
            snapshot::load_path(&self.file)?
        };
        Ok(snapshot)
    }
}
