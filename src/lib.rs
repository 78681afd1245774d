//! # taskfeed
//!
//! Task and tag store with a legacy read-only provider for external
//! consumers, and JSON backups.
//!
//! ## Features
//!
//! - **Legacy Provider**: `tasks` and `tags` published as flat tabular cursors
//!   under `content://<authority>/`, with MD5-derived tag ids
//! - **Change Notification**: broadcast hook fired after every committed mutation
//! - **Task Store**: SQLite-backed tasks and tags with versioned migrations
//! - **Backups**: JSON export of the whole store with progress reporting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskfeed::db::store::Store;
//! use taskfeed::provider::LegacyTaskProvider;
//!
//! let provider = LegacyTaskProvider::new(Store::new()?, "taskfeed.tasksprovider");
//! let tasks = provider.query("content://taskfeed.tasksprovider/tasks", None)?;
//! println!("{} open tasks", tasks.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod provider;
