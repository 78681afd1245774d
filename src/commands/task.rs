use super::open_provider;
use crate::db::store::Store;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter, PRIORITY_NONE};
use crate::libs::view::View;
use crate::provider::legacy::TAG_SEPARATOR;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task
    Add {
        title: String,
        /// 0 (high) to 3 (none)
        #[arg(short, long, default_value_t = PRIORITY_NONE, value_parser = clap::value_parser!(i32).range(0..=3))]
        priority: i32,
        /// Due date, YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Tag names, repeat or separate with commas
        #[arg(short, long, value_delimiter = ',')]
        tag: Vec<String>,
    },
    /// List open tasks
    List {
        /// Include completed and deleted tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Mark a task completed
    Done { id: i64 },
    /// Delete a task
    Delete { id: i64 },
    /// Replace a task's tags (no names clears them)
    Tag { id: i64, tags: Vec<String> },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::Add { title, priority, due, tag } => handle_add(title, priority, due, tag),
        TaskCommand::List { all } => handle_list(all),
        TaskCommand::Done { id } => handle_done(id),
        TaskCommand::Delete { id } => handle_delete(id),
        TaskCommand::Tag { id, tags } => handle_tag(id, tags),
    }
}

/// Date-only due dates land on local noon.
pub(crate) fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        msg_bail_anyhow!(Message::InvalidDueDate(value.to_string()));
    };
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    match Local.from_local_datetime(&noon).earliest() {
        Some(local) => Ok(local.with_timezone(&Utc)),
        None => Ok(Utc.from_utc_datetime(&noon)),
    }
}

fn handle_add(title: String, priority: i32, due: Option<String>, tags: Vec<String>) -> Result<()> {
    let due_date = due.as_deref().map(parse_due).transpose()?;
    let (_, mut provider) = open_provider()?;

    let id = provider.source_mut().add_task(&Task::new(&title, priority, due_date), &tags)?;
    provider.notify_changed();

    msg_success!(Message::TaskCreated(id, title));
    Ok(())
}

fn handle_list(all: bool) -> Result<()> {
    let (_, provider) = open_provider()?;
    let store = provider.source();
    let filter = if all { TaskFilter::All } else { TaskFilter::Exportable };

    let tasks = store.tasks().fetch(filter)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    let rows = tasks
        .into_iter()
        .map(|task| {
            let tags = store.tags().tag_names_for_task(task.id.unwrap_or_default())?.join(", ");
            Ok((task, tags))
        })
        .collect::<Result<Vec<_>>>()?;
    View::tasks(&rows);
    Ok(())
}

fn handle_done(id: i64) -> Result<()> {
    let (_, provider) = open_provider()?;
    if provider.source().tasks().complete(id)? {
        provider.notify_changed();
    }
    msg_success!(Message::TaskCompleted(id));
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let (_, provider) = open_provider()?;
    if provider.source().tasks().delete(id)? {
        provider.notify_changed();
    }
    msg_success!(Message::TaskDeleted(id));
    Ok(())
}

fn handle_tag(id: i64, tags: Vec<String>) -> Result<()> {
    let (_, mut provider) = open_provider()?;
    provider.source_mut().tag_task(id, &tags)?;
    provider.notify_changed();

    msg_success!(Message::TaskTagsUpdated(id, joined_tags(provider.source(), id)?));
    Ok(())
}

/// Tag names as published in the provider's `tags_id` column.
pub(crate) fn joined_tags(store: &Store, id: i64) -> Result<String> {
    Ok(store.tags().tag_names_for_task(id)?.join(TAG_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_dates_parse_to_local_noon() {
        let due = parse_due("2024-07-04").unwrap();
        let local = due.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-07-04 12:00");
    }

    #[test]
    fn echoed_tags_match_the_provider_column() {
        use crate::provider::legacy::TAGS_ID;
        use crate::provider::LegacyTaskProvider;

        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .add_task(&Task::new("Plan trip", 2, None), &["work".to_string(), "home".to_string()])
            .unwrap();
        let echoed = joined_tags(&store, id).unwrap();

        let provider = LegacyTaskProvider::new(store, "a.b");
        assert_eq!(echoed, "home|work");
        assert_eq!(provider.tasks().unwrap().get_string(0, TAGS_ID), Some(echoed.as_str()));
    }

    #[test]
    fn malformed_due_dates_are_rejected() {
        for value in ["07/04/2024", "2024-13-01", "tomorrow"] {
            let err = parse_due(value).unwrap_err();
            assert!(err.to_string().contains(value));
        }
    }
}
