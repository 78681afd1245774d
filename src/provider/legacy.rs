use super::colors::{ColorResolver, Palette, PriorityColor};
use super::cursor::{ContentValues, Cursor, Value};
use super::error::ProviderError;
use super::notify::ChangeNotifier;
use super::source::DataSource;
use super::tag_id::{synthetic_tag_id, Md5Digest, NameDigest};
use super::uri::{Resource, UriMatcher};
use tokio::sync::broadcast;

pub const NAME: &str = "name";
pub const IMPORTANCE_COLOR: &str = "importance_color";
pub const PREFERRED_DUE_DATE: &str = "preferredDueDate";
pub const DEFINITE_DUE_DATE: &str = "definiteDueDate";
pub const IMPORTANCE: &str = "importance";
pub const IDENTIFIER: &str = "identifier";
pub const TAGS_ID: &str = "tags_id";
pub const ID: &str = "id";

pub const TASK_FIELD_LIST: [&str; 7] = [
    NAME,
    IMPORTANCE_COLOR,
    PREFERRED_DUE_DATE,
    DEFINITE_DUE_DATE,
    IMPORTANCE,
    IDENTIFIER,
    TAGS_ID,
];
pub const TAGS_FIELD_LIST: [&str; 2] = [ID, NAME];

pub const TAG_SEPARATOR: &str = "|";

/// Read-only tabular view over tasks and tags.
///
/// Every query materializes its full result before returning. Writes are not
/// part of this surface: [`insert`](Self::insert) and [`delete`](Self::delete)
/// do nothing, [`update`](Self::update) always fails.
pub struct LegacyTaskProvider<S> {
    source: S,
    matcher: UriMatcher,
    colors: Box<dyn ColorResolver>,
    digest: Box<dyn NameDigest>,
    notifier: ChangeNotifier,
}

impl<S: DataSource> LegacyTaskProvider<S> {
    pub fn new(source: S, authority: &str) -> Self {
        let matcher = UriMatcher::new(authority);
        let notifier = ChangeNotifier::new(matcher.content_uri());
        Self {
            source,
            matcher,
            colors: Box::new(Palette::default()),
            digest: Box::new(Md5Digest),
            notifier,
        }
    }

    pub fn with_colors(mut self, colors: impl ColorResolver + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    pub fn with_digest(mut self, digest: impl NameDigest + 'static) -> Self {
        self.digest = Box::new(digest);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutation paths must call [`notify_changed`](Self::notify_changed) after committing.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn matcher(&self) -> &UriMatcher {
        &self.matcher
    }

    pub fn query(&self, uri: &str, projection: Option<&[&str]>) -> Result<Cursor, ProviderError> {
        let cursor = match self.matcher.resolve(uri)? {
            Resource::Tasks => self.tasks()?,
            Resource::Tags => self.tags()?,
        };
        match projection {
            Some(columns) => cursor.project(columns),
            None => Ok(cursor),
        }
    }

    /// Two columns: synthetic tag id and tag name, ordered by name.
    pub fn tags(&self) -> Result<Cursor, ProviderError> {
        let tags = self.source.tags_ordered_by_name()?;

        let mut ret = Cursor::new(&TAGS_FIELD_LIST);
        for tag in tags {
            let id = synthetic_tag_id(self.digest.as_ref(), &tag.name);
            ret.add_row(vec![Value::from(id), Value::from(tag.name)])?;
        }
        Ok(ret)
    }

    /// Seven columns, see [`TASK_FIELD_LIST`]. Due dates are epoch millis,
    /// `0` when unset, and repeated in both legacy due date columns.
    pub fn tasks(&self) -> Result<Cursor, ProviderError> {
        let tasks = self.source.exportable_tasks()?;

        let mut ret = Cursor::new(&TASK_FIELD_LIST);
        for task in tasks {
            let id = task.id.unwrap_or_default();
            let task_tags = self.source.tag_names(id)?.join(TAG_SEPARATOR);
            let color = self.colors.resolve(PriorityColor::for_priority(task.priority));
            let due = task.due_millis();

            ret.add_row(vec![
                Value::from(task.title),
                Value::from(color.as_color_int()),
                Value::from(due),
                Value::from(due),
                Value::from(task.priority),
                Value::from(id),
                Value::from(task_tags),
            ])?;
        }
        Ok(ret)
    }

    pub fn get_type(&self, _uri: &str) -> Option<String> {
        None
    }

    pub fn insert(&self, uri: &str, _values: &ContentValues) -> Option<String> {
        tracing::debug!(uri, "ignoring insert");
        None
    }

    pub fn delete(&self, uri: &str, _selection: Option<&str>, _selection_args: &[&str]) -> usize {
        tracing::debug!(uri, "ignoring delete");
        0
    }

    pub fn update(
        &self,
        _uri: &str,
        _values: &ContentValues,
        _selection: Option<&str>,
        _selection_args: &[&str],
    ) -> Result<usize, ProviderError> {
        Err(ProviderError::Unsupported("not supported"))
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn subscribe(&self) -> broadcast::Receiver<super::notify::ContentChange> {
        self.notifier.subscribe()
    }

    /// Publishes a change of the provider root. Call after committing.
    pub fn notify_changed(&self) {
        self.notifier.notify_change();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tags::Tag;
    use crate::libs::task::Task;
    use crate::provider::colors::Argb;
    use crate::provider::source::{TagSource, TaskSource, TaskTagSource};
    use crate::provider::tag_id::DigestError;
    use anyhow::{anyhow, Result};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    const AUTHORITY: &str = "org.example.tasksprovider";

    #[derive(Default)]
    struct Fixture {
        tasks: Vec<Task>,
        tags: Vec<&'static str>,
        task_tags: HashMap<i64, Vec<&'static str>>,
        broken: bool,
    }

    impl TaskSource for Fixture {
        fn exportable_tasks(&self) -> Result<Vec<Task>> {
            if self.broken {
                return Err(anyhow!("disk I/O error"));
            }
            Ok(self.tasks.clone())
        }
    }

    impl TagSource for Fixture {
        fn tags_ordered_by_name(&self) -> Result<Vec<Tag>> {
            Ok(self.tags.iter().map(|n| Tag::new(n.to_string(), None)).collect())
        }
    }

    impl TaskTagSource for Fixture {
        fn tag_names(&self, task_id: i64) -> Result<Vec<String>> {
            Ok(self
                .task_tags
                .get(&task_id)
                .map(|names| names.iter().map(|n| n.to_string()).collect())
                .unwrap_or_default())
        }
    }

    fn task(id: i64, title: &str, priority: i32) -> Task {
        let mut task = Task::new(title, priority, None);
        task.id = Some(id);
        task
    }

    fn provider(fixture: Fixture) -> LegacyTaskProvider<Fixture> {
        LegacyTaskProvider::new(fixture, AUTHORITY)
    }

    fn uri(path: &str) -> String {
        format!("content://{}/{}", AUTHORITY, path)
    }

    #[test]
    fn tags_cursor_layout() {
        let p = provider(Fixture {
            tags: vec!["home", "work"],
            ..Default::default()
        });
        let cursor = p.query(&uri("tags"), None).unwrap();
        assert_eq!(cursor.columns(), ["id", "name"]);
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.get_i64(0, ID), Some(3323224629456577025));
        assert_eq!(cursor.get_string(0, NAME), Some("home"));
        assert_eq!(cursor.get_string(1, NAME), Some("work"));
    }

    #[test]
    fn tag_ids_are_stable_across_queries() {
        let p = provider(Fixture {
            tags: vec!["errands", "garden", "taxes"],
            ..Default::default()
        });
        let first = p.tags().unwrap();
        let second = p.tags().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tasks_cursor_layout() {
        let due = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut t = task(5, "File taxes", 0);
        t.due_date = Some(due);
        let p = provider(Fixture {
            tasks: vec![t],
            task_tags: HashMap::from([(5, vec!["home", "work"])]),
            ..Default::default()
        });

        let cursor = p.query(&uri("tasks"), None).unwrap();
        assert_eq!(cursor.columns(), TASK_FIELD_LIST);
        let row = cursor.row(0).unwrap();
        assert_eq!(row[0], Value::from("File taxes"));
        assert_eq!(row[1], Value::from(Argb(0xFFF44336).as_color_int()));
        assert_eq!(row[2], Value::from(due.timestamp_millis()));
        assert_eq!(row[3], row[2]);
        assert_eq!(row[4], Value::from(0i32));
        assert_eq!(row[5], Value::from(5i64));
        assert_eq!(row[6], Value::from("home|work"));
    }

    #[test]
    fn untagged_task_joins_to_empty_string() {
        let p = provider(Fixture {
            tasks: vec![task(1, "Call mom", 3)],
            ..Default::default()
        });
        let cursor = p.tasks().unwrap();
        assert_eq!(cursor.get_string(0, TAGS_ID), Some(""));
        assert_eq!(cursor.get_i64(0, PREFERRED_DUE_DATE), Some(0));
        assert_eq!(cursor.get_i64(0, DEFINITE_DUE_DATE), Some(0));
    }

    #[test]
    fn rows_keep_store_order() {
        let p = provider(Fixture {
            tasks: vec![task(9, "b", 1), task(2, "a", 2), task(4, "c", 0)],
            ..Default::default()
        });
        let cursor = p.tasks().unwrap();
        let ids: Vec<i64> = (0..cursor.len()).filter_map(|i| cursor.get_i64(i, IDENTIFIER)).collect();
        assert_eq!(ids, [9, 2, 4]);
    }

    #[test]
    fn importance_color_boundaries() {
        let palette = Palette::default();
        let p = provider(Fixture {
            tasks: vec![task(1, "neg", -2), task(2, "zero", 0), task(3, "one", 1), task(4, "two", 2), task(5, "three", 3), task(6, "nine", 9)],
            ..Default::default()
        });
        let cursor = p.tasks().unwrap();
        let colors: Vec<i64> = (0..cursor.len()).filter_map(|i| cursor.get_i64(i, IMPORTANCE_COLOR)).collect();
        let expect = |a: Argb| i64::from(a.as_color_int());
        assert_eq!(
            colors,
            [
                expect(palette.red),
                expect(palette.red),
                expect(palette.amber),
                expect(palette.blue),
                expect(palette.grey),
                expect(palette.grey),
            ]
        );
    }

    #[test]
    fn custom_color_resolver() {
        struct Mono;
        impl ColorResolver for Mono {
            fn resolve(&self, _role: PriorityColor) -> Argb {
                Argb(0xFF000000)
            }
        }
        let p = provider(Fixture {
            tasks: vec![task(1, "x", 2)],
            ..Default::default()
        })
        .with_colors(Mono);
        assert_eq!(p.tasks().unwrap().get_i64(0, IMPORTANCE_COLOR), Some(i64::from(0xFF000000u32 as i32)));
    }

    #[test]
    fn unavailable_digest_degrades_ids() {
        struct Missing;
        impl NameDigest for Missing {
            fn algorithm(&self) -> &str {
                "MD5"
            }
            fn digest(&self, _bytes: &[u8]) -> Result<Vec<u8>, DigestError> {
                Err(DigestError {
                    algorithm: "MD5".into(),
                    reason: "provider missing".into(),
                })
            }
        }
        let p = provider(Fixture {
            tags: vec!["a", "b"],
            ..Default::default()
        })
        .with_digest(Missing);
        let cursor = p.tags().unwrap();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.get_i64(0, ID), Some(-1));
        assert_eq!(cursor.get_i64(1, ID), Some(-1));
    }

    #[test]
    fn unrecognized_uri_fails() {
        let p = provider(Fixture::default());
        for path in ["", "task", "tasks/1", "TAGS"] {
            let err = p.query(&uri(path), None).unwrap_err();
            assert!(matches!(err, ProviderError::UnrecognizedUri(_)), "{path}");
        }
        assert!(p.query("content://someone.else/tasks", None).is_err());
    }

    #[test]
    fn projection_is_applied() {
        let p = provider(Fixture {
            tasks: vec![task(3, "Plan trip", 1)],
            ..Default::default()
        });
        let cursor = p.query(&uri("tasks"), Some(&[IDENTIFIER, NAME][..])).unwrap();
        assert_eq!(cursor.columns(), [IDENTIFIER, NAME]);
        assert_eq!(cursor.row(0).unwrap(), [Value::from(3i64), Value::from("Plan trip")]);

        let err = p.query(&uri("tags"), Some(&["color"][..])).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownColumn(c) if c == "color"));
    }

    #[test]
    fn store_failure_fails_the_whole_call() {
        let p = provider(Fixture {
            broken: true,
            ..Default::default()
        });
        let err = p.query(&uri("tasks"), None).unwrap_err();
        assert!(matches!(err, ProviderError::Store(_)));
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn writes_are_not_applied() {
        let p = provider(Fixture::default());
        let values = ContentValues::from([(NAME.to_string(), Value::from("x"))]);
        assert_eq!(p.insert(&uri("tasks"), &values), None);
        assert_eq!(p.delete(&uri("tasks"), None, &[]), 0);
        let err = p.update(&uri("tasks"), &values, None, &[]).unwrap_err();
        assert_eq!(err.to_string(), "not supported");
        assert_eq!(p.get_type(&uri("tasks")), None);
    }

    #[test]
    fn notifies_on_the_root_uri() {
        let p = provider(Fixture::default());
        let mut rx = p.subscribe();
        p.notify_changed();
        assert_eq!(rx.try_recv().unwrap().uri, format!("content://{}", AUTHORITY));
    }
}
