pub mod export;
pub mod init;
pub mod query;
pub mod tag;
pub mod task;

use crate::db::store::Store;
use crate::libs::config::Config;
use crate::provider::LegacyTaskProvider;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the default configuration file")]
    Init(init::InitArgs),
    #[command(about = "Create, list, complete and tag tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage tags")]
    Tag(tag::TagArgs),
    #[command(about = "Query the legacy provider (tasks or tags)", arg_required_else_help = true)]
    Query(query::QueryArgs),
    #[command(about = "Export all tasks and tags to a JSON backup")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Tag(args) => tag::cmd(args),
            Commands::Query(args) => query::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Opens the store behind a provider configured from `config.json`.
pub(crate) fn open_provider() -> Result<(Config, LegacyTaskProvider<Store>)> {
    let config = Config::read()?;
    let provider = LegacyTaskProvider::new(Store::new()?, &config.authority).with_colors(config.palette()?);
    Ok((config, provider))
}
