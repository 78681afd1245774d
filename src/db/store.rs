//! The task/tag store as seen by the provider and the backup exporter.

use super::db::Db;
use super::tags::{Tag, Tags};
use super::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter};
use crate::msg_error_anyhow;
use crate::provider::source::{TagSource, TaskSource, TaskTagSource};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// One connection shared by the task and tag views. Multi-step writes
/// commit all together or not at all.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new() -> Result<Self> {
        Ok(Self { conn: Db::new()?.conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self { conn: Db::open(path)?.conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Db::open_in_memory()?.conn,
        })
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(&self.conn)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(&self.conn)
    }

    /// Inserts a task with the given tag names and returns its id.
    pub fn add_task(&mut self, task: &Task, tag_names: &[String]) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let id = Tasks::new(&tx).insert(task)?;
        if !tag_names.is_empty() {
            link_tags(&tx, id, tag_names)?;
        }
        tx.commit()?;
        Ok(id)
    }

    /// Replaces a task's tags, creating unknown tag names.
    pub fn tag_task(&mut self, task_id: i64, tag_names: &[String]) -> Result<()> {
        let tx = self.conn.transaction()?;
        if Tasks::new(&tx).get_by_id(task_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(task_id)));
        }
        link_tags(&tx, task_id, tag_names)?;
        tx.commit()?;
        Ok(())
    }

    /// Every task, completed and deleted ones included, in id order.
    pub fn all_tasks(&self) -> Result<Vec<Task>> {
        self.tasks().fetch(TaskFilter::All)
    }
}

fn link_tags(conn: &Connection, task_id: i64, tag_names: &[String]) -> Result<()> {
    let tags = Tags::new(conn);
    let tag_ids = tags.get_or_create_tags(tag_names)?;
    tags.replace_task_links(task_id, &tag_ids)
}

impl TaskSource for Store {
    fn exportable_tasks(&self) -> Result<Vec<Task>> {
        self.tasks().fetch(TaskFilter::Exportable)
    }
}

impl TagSource for Store {
    fn tags_ordered_by_name(&self) -> Result<Vec<Tag>> {
        self.tags().list()
    }
}

impl TaskTagSource for Store {
    fn tag_names(&self, task_id: i64) -> Result<Vec<String>> {
        self.tags().tag_names_for_task(task_id)
    }
}
