use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_TAG: &str = "INSERT INTO tags (name, color) VALUES (?1, ?2)";
const DELETE_TAG: &str = "DELETE FROM tags WHERE id = ?1";
const DELETE_TAG_LINKS: &str = "DELETE FROM task_tags WHERE tag_id = ?1";
const SELECT_ALL_TAGS: &str = "SELECT id, name, color, created_at FROM tags ORDER BY name";
const SELECT_TAG_BY_NAME: &str = "SELECT id, name, color, created_at FROM tags WHERE name = ?1";
const SELECT_TAG_BY_ID: &str = "SELECT id, name, color, created_at FROM tags WHERE id = ?1";
const SELECT_TAG_NAMES_BY_TASK: &str = "
    SELECT t.name FROM tags t
    JOIN task_tags tt ON t.id = tt.tag_id
    WHERE tt.task_id = ?1
    ORDER BY t.name
";
const SELECT_TASKS_BY_TAG: &str = "SELECT task_id FROM task_tags WHERE tag_id = ?1 ORDER BY task_id";
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)";
const DELETE_ALL_TASK_TAGS: &str = "DELETE FROM task_tags WHERE task_id = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<i64>,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Option<String>,
}

impl Tag {
    pub fn new(name: String, color: Option<String>) -> Self {
        Self {
            id: None,
            name,
            color,
            created_at: None,
        }
    }
}

fn map_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub struct Tags<'c> {
    conn: &'c Connection,
}

impl<'c> Tags<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, tag: &Tag) -> Result<i64> {
        self.conn.execute(INSERT_TAG, params![tag.name, tag.color])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Removes the tag and detaches it from every task.
    pub fn delete(&self, id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(DELETE_TAG_LINKS, params![id])?;
        let affected = tx.execute(DELETE_TAG, params![id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TagNotFound(id.to_string())));
        }
        tx.commit()?;
        Ok(())
    }

    /// All tags ordered by name.
    pub fn list(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TAGS)?;
        let tags = stmt.query_map([], map_tag)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.conn
            .query_row(SELECT_TAG_BY_NAME, params![name], map_tag)
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Tag>> {
        self.conn
            .query_row(SELECT_TAG_BY_ID, params![id], map_tag)
            .optional()
            .map_err(Into::into)
    }

    /// Names of the tags attached to a task, ordered by name.
    pub fn tag_names_for_task(&self, task_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_TAG_NAMES_BY_TASK)?;
        let names = stmt
            .query_map(params![task_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    pub fn get_tasks_with_tag(&self, tag_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_BY_TAG)?;
        let ids = stmt
            .query_map(params![tag_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    /// Replaces the task's tags with `tag_ids` in its own transaction.
    pub fn set_task_tags(&self, task_id: i64, tag_ids: &[i64]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        Tags::new(&tx).replace_task_links(task_id, tag_ids)?;
        tx.commit()?;
        Ok(())
    }

    /// Same as [`set_task_tags`](Self::set_task_tags) but inside the
    /// caller's transaction.
    pub(crate) fn replace_task_links(&self, task_id: i64, tag_ids: &[i64]) -> Result<()> {
        self.conn.execute(DELETE_ALL_TASK_TAGS, params![task_id])?;
        for tag_id in tag_ids {
            self.conn.execute(INSERT_TASK_TAG, params![task_id, tag_id])?;
        }
        Ok(())
    }

    /// Ids for `names`, creating the tags that don't exist yet.
    pub fn get_or_create_tags(&self, names: &[String]) -> Result<Vec<i64>> {
        let mut tag_ids = Vec::new();

        for name in names {
            let id = match self.get_by_name(name)?.and_then(|tag| tag.id) {
                Some(id) => id,
                None => self.create(&Tag::new(name.clone(), None))?,
            };
            tag_ids.push(id);
        }

        Ok(tag_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::Db;

    fn db() -> Db {
        Db::open_in_memory().unwrap()
    }

    #[test]
    fn list_is_ordered_by_name() {
        let db = db();
        let tags = Tags::new(&db.conn);
        for name in ["work", "errands", "home"] {
            tags.create(&Tag::new(name.to_string(), None)).unwrap();
        }
        let names: Vec<String> = tags.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["errands", "home", "work"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let db = db();
        let tags = Tags::new(&db.conn);
        tags.create(&Tag::new("home".to_string(), None)).unwrap();
        assert!(tags.create(&Tag::new("home".to_string(), Some("red".to_string()))).is_err());
    }

    #[test]
    fn deleting_a_tag_detaches_it() {
        let db = db();
        let tags = Tags::new(&db.conn);
        let ids = tags.get_or_create_tags(&["home".to_string(), "work".to_string()]).unwrap();
        tags.set_task_tags(1, &ids).unwrap();

        tags.delete(ids[0]).unwrap();
        assert_eq!(tags.tag_names_for_task(1).unwrap(), ["work"]);
        assert!(tags.get_tasks_with_tag(ids[0]).unwrap().is_empty());
        assert!(tags.delete(ids[0]).is_err());
    }
}
