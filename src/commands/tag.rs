use super::open_provider;
use crate::db::tags::Tag;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::provider::tag_id::tag_name_to_long;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    command: TagCommand,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Create a new tag
    Create {
        name: String,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all tags
    List,
    /// Delete a tag and detach it from its tasks
    Delete { name: String },
    /// Show the synthetic id published for a tag name
    Id { name: String },
}

pub fn cmd(args: TagArgs) -> Result<()> {
    match args.command {
        TagCommand::Create { name, color } => handle_create(name, color),
        TagCommand::List => handle_list(),
        TagCommand::Delete { name } => handle_delete(name),
        TagCommand::Id { name } => {
            msg_print!(tag_name_to_long(&name));
            Ok(())
        }
    }
}

fn handle_create(name: String, color: Option<String>) -> Result<()> {
    let (_, provider) = open_provider()?;
    let tags = provider.source().tags();

    if tags.get_by_name(&name)?.is_some() {
        msg_error!(Message::TagAlreadyExists(name));
        return Ok(());
    }

    tags.create(&Tag::new(name.clone(), color))?;
    provider.notify_changed();

    msg_success!(Message::TagCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let (_, provider) = open_provider()?;
    let tags = provider.source().tags().list()?;

    if tags.is_empty() {
        msg_info!(Message::NoTagsFound);
        return Ok(());
    }

    msg_print!(Message::TagListHeader);
    View::tags(&tags);
    Ok(())
}

fn handle_delete(name: String) -> Result<()> {
    let (_, provider) = open_provider()?;

    let Some(id) = provider.source().tags().get_by_name(&name)?.and_then(|tag| tag.id) else {
        msg_error!(Message::TagNotFound(name));
        return Ok(());
    };

    provider.source().tags().delete(id)?;
    provider.notify_changed();

    msg_success!(Message::TagDeleted(name));
    Ok(())
}
