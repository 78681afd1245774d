//! Backup export command.
//!
//! Writes every task and tag to a JSON file in the backup directory
//! (`backup_dir` in the configuration, `backups/` in the data directory
//! otherwise) and prints progress while doing so.

use crate::db::store::Store;
use crate::libs::config::Config;
use crate::libs::export::{ConsoleProgress, ExportType, Exporter};
use crate::libs::messages::Message;
use crate::msg_error;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

const PROGRESS_STEPS: usize = 10;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Name the file as an automatic backup (auto.*) instead of a manual one (user.*)
    #[arg(long)]
    auto: bool,

    /// Directory to write to, overriding the configured backup directory
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let store = Store::new()?;
    let dir = args.dir.unwrap_or_else(|| config.backup_dir());
    let kind = if args.auto { ExportType::Auto } else { ExportType::Manual };

    let mut progress = ConsoleProgress::new(PROGRESS_STEPS);
    if let Err(e) = Exporter::new(dir).export(&store, kind, &mut progress) {
        msg_error!(Message::ExportFailed(format!("{:#}", e)));
        return Err(e);
    }
    Ok(())
}
