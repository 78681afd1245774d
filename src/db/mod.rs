//! SQLite persistence for tasks and tags.
//!
//! The store owns all task and tag data. The provider and the backup exporter
//! only read it through [`store::Store`]; CLI commands mutate it.
//!
//! ```rust,no_run
//! use taskfeed::db::store::Store;
//! use taskfeed::libs::task::Task;
//!
//! let mut store = Store::new()?;
//! let id = store.add_task(&Task::new("Water plants", 2, None), &["home".to_string()])?;
//! assert_eq!(store.tags().tag_names_for_task(id)?, ["home"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup. Every open applies pending migrations.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Store facade implementing the provider's lookups.
pub mod store;

/// Tags and the task-tag association.
pub mod tags;

/// Task records with soft delete and completion.
pub mod tasks;
