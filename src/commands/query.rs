use super::open_provider;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::provider::uri::SCHEME;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::io;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Full content:// URI, or just `tasks` / `tags` under the configured authority
    uri: String,

    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Only these columns, in this order
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,
}

/// Expands a bare resource path to a URI under `authority`.
pub(crate) fn expand_uri(uri: &str, authority: &str) -> String {
    if uri.contains("://") {
        uri.to_string()
    } else {
        format!("{}://{}/{}", SCHEME, authority, uri.trim_start_matches('/'))
    }
}

pub fn cmd(args: QueryArgs) -> Result<()> {
    let (config, provider) = open_provider()?;
    let uri = expand_uri(&args.uri, &config.authority);

    let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
    let projection = (!columns.is_empty()).then_some(columns.as_slice());
    let cursor = provider.query(&uri, projection)?;
    msg_debug!(Message::QueryResult(cursor.len(), uri.clone()));

    match args.format {
        OutputFormat::Table if cursor.is_empty() => msg_info!(Message::NoRowsReturned(uri)),
        OutputFormat::Table => View::cursor(&cursor),
        OutputFormat::Csv => cursor.write_csv(io::stdout().lock())?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cursor.to_json())?),
    }
    Ok(())
}
