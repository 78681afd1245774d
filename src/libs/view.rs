use super::task::Task;
use crate::db::tags::Tag;
use crate::provider::cursor::Cursor;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn cursor(cursor: &Cursor) {
        let mut table = Table::new();

        table.set_titles(Row::new(cursor.columns().iter().map(|c| Cell::new(c)).collect()));
        for values in cursor.rows() {
            table.add_row(Row::new(values.iter().map(|v| Cell::new(&v.to_string())).collect()));
        }
        table.printstd();
    }

    /// Tasks paired with their joined tag names.
    pub fn tasks(tasks: &[(Task, String)]) {
        let mut table = Table::new();

        table.set_titles(row!["ID", "TITLE", "PRIORITY", "DUE", "TAGS", "STATUS"]);
        for (task, tags) in tasks {
            let due = task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let status = if task.is_deleted() {
                "deleted"
            } else if task.is_completed() {
                "done"
            } else {
                ""
            };
            table.add_row(row![task.id.unwrap_or(0), task.title, task.priority, due, tags, status]);
        }
        table.printstd();
    }

    pub fn tags(tags: &[Tag]) {
        let mut table = Table::new();

        table.set_titles(row!["ID", "NAME", "COLOR"]);
        for tag in tags {
            table.add_row(row![tag.id.unwrap_or(0), tag.name, tag.color.as_deref().unwrap_or("")]);
        }
        table.printstd();
    }
}
