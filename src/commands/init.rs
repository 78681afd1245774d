use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Provider authority, the root of every content:// path
    #[arg(short, long)]
    authority: Option<String>,

    /// Keep existing settings and only change what is given
    #[arg(short, long)]
    keep: bool,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    let mut config = if args.keep { Config::read()? } else { Config::default() };
    if let Some(authority) = args.authority {
        config.authority = authority;
    }

    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
