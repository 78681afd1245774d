//! JSON backups of the whole store.
//!
//! A backup contains every task (completed and deleted ones too) with its tag
//! names, plus every tag. Progress is reported per task to a
//! [`ProgressSink`]; an export runs to completion once started.
//!
//! ## File naming
//!
//! - Manual exports: `user.<yyMMdd-HHmm>.json`
//! - Automatic exports: `auto.<yyMMdd-HHmm>.json`
//!
//! ```rust,no_run
//! use taskfeed::db::store::Store;
//! use taskfeed::libs::export::{Exporter, ExportType, NoProgress};
//!
//! let store = Store::new()?;
//! let path = Exporter::new("/tmp/backups").export(&store, ExportType::Manual, &mut NoProgress)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::store::Store;
use crate::libs::messages::Message;
use crate::{msg_print, msg_success};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportType {
    Manual,
    Auto,
}

impl ExportType {
    fn prefix(self) -> &'static str {
        match self {
            ExportType::Manual => "user",
            ExportType::Auto => "auto",
        }
    }
}

/// Receives determinate progress for a running export.
pub trait ProgressSink {
    fn start(&mut self, max: usize);

    /// Called once per exported task with the running count.
    fn advance(&mut self, done: usize);

    fn finish(&mut self);
}

/// Discards progress.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _max: usize) {}

    fn advance(&mut self, _done: usize) {}

    fn finish(&mut self) {}
}

/// Prints progress through the message macros, at most `steps` updates.
pub struct ConsoleProgress {
    max: usize,
    steps: usize,
    last_reported: usize,
}

impl ConsoleProgress {
    pub fn new(steps: usize) -> Self {
        Self {
            max: 0,
            steps: steps.max(1),
            last_reported: 0,
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn start(&mut self, max: usize) {
        self.max = max;
        self.last_reported = 0;
        msg_print!(Message::ExportStarted(max));
    }

    fn advance(&mut self, done: usize) {
        let stride = (self.max / self.steps).max(1);
        if done == self.max || done >= self.last_reported + stride {
            self.last_reported = done;
            msg_print!(Message::ExportProgress(done, self.max));
        }
    }

    fn finish(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupTask {
    pub id: i64,
    pub title: String,
    pub priority: i32,
    /// Epoch millis.
    pub due_date: Option<i64>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub deleted_at: Option<i64>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupTag {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: u32,
    /// Epoch millis at export time.
    pub timestamp: i64,
    pub tasks: Vec<BackupTask>,
    pub tags: Vec<BackupTag>,
}

pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(kind: ExportType, at: DateTime<Local>) -> String {
        format!("{}.{}.json", kind.prefix(), at.format("%y%m%d-%H%M"))
    }

    /// Collects the store into a backup document.
    pub fn collect(store: &Store, progress: &mut dyn ProgressSink) -> Result<BackupDocument> {
        let tasks = store.all_tasks()?;
        progress.start(tasks.len());

        let mut backup_tasks = Vec::with_capacity(tasks.len());
        for (done, task) in tasks.into_iter().enumerate() {
            let id = task.id.unwrap_or_default();
            backup_tasks.push(BackupTask {
                id,
                tags: store.tags().tag_names_for_task(id)?,
                title: task.title,
                priority: task.priority,
                due_date: task.due_date.map(|d| d.timestamp_millis()),
                created_at: task.created_at.map(|d| d.timestamp_millis()),
                completed_at: task.completed_at.map(|d| d.timestamp_millis()),
                deleted_at: task.deleted_at.map(|d| d.timestamp_millis()),
            });
            progress.advance(done + 1);
        }

        let tags = store
            .tags()
            .list()?
            .into_iter()
            .map(|tag| BackupTag {
                name: tag.name,
                color: tag.color,
            })
            .collect();
        progress.finish();

        Ok(BackupDocument {
            version: BACKUP_VERSION,
            timestamp: Utc::now().timestamp_millis(),
            tasks: backup_tasks,
            tags,
        })
    }

    /// Writes a backup file and returns its path.
    pub fn export(&self, store: &Store, kind: ExportType, progress: &mut dyn ProgressSink) -> Result<PathBuf> {
        let document = Self::collect(store, progress)?;

        fs::create_dir_all(&self.dir).with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.dir.join(Self::file_name(kind, Local::now()));
        let mut writer = BufWriter::new(File::create(&path).with_context(|| format!("creating {}", path.display()))?);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;

        tracing::info!(path = %path.display(), tasks = document.tasks.len(), "backup written");
        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(path)
    }
}
