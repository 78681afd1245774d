//! Store lookups the provider reads through.

use crate::db::tags::Tag;
use crate::libs::task::Task;
use anyhow::Result;

pub trait TaskSource {
    /// Tasks visible to external consumers, in store order.
    fn exportable_tasks(&self) -> Result<Vec<Task>>;
}

pub trait TagSource {
    fn tags_ordered_by_name(&self) -> Result<Vec<Tag>>;
}

pub trait TaskTagSource {
    fn tag_names(&self, task_id: i64) -> Result<Vec<String>>;
}

pub trait DataSource: TaskSource + TagSource + TaskTagSource {}

impl<T: TaskSource + TagSource + TaskTagSource> DataSource for T {}
