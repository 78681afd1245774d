//! Legacy read-only data provider for external consumers.
//!
//! Publishes two logical resources, `tasks` and `tags`, as flat tabular
//! cursors addressed by `content://<authority>/<resource>` paths. The provider
//! never mutates the store: inserts and deletes are accepted as no-ops, updates
//! are rejected.
//!
//! ## Resources
//!
//! - **`tasks`**: `name`, `importance_color`, `preferredDueDate`,
//!   `definiteDueDate`, `importance`, `identifier`, `tags_id`
//! - **`tags`**: `id`, `name`
//!
//! Tag ids are synthetic: tags have no exported id column, so the id is
//! derived from an MD5 digest of the tag name (see [`tag_id`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskfeed::db::store::Store;
//! use taskfeed::provider::LegacyTaskProvider;
//!
//! let store = Store::new()?;
//! let provider = LegacyTaskProvider::new(store, "taskfeed.tasksprovider");
//! let cursor = provider.query("content://taskfeed.tasksprovider/tags", None)?;
//! for row in cursor.rows() {
//!     println!("{} {}", row[0], row[1]);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod colors;
pub mod cursor;
pub mod error;
pub mod legacy;
pub mod notify;
pub mod source;
pub mod tag_id;
pub mod uri;

pub use colors::{Argb, ColorResolver, Palette, PriorityColor};
pub use cursor::{ContentValues, Cursor, Value};
pub use error::ProviderError;
pub use legacy::LegacyTaskProvider;
pub use notify::{ChangeNotifier, ContentChange};
pub use source::{DataSource, TagSource, TaskSource, TaskTagSource};
pub use uri::{Resource, UriMatcher};
