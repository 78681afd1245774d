use anyhow::Result;
use taskfeed::commands::Cli;
use taskfeed::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskfeed=debug"));
        tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
    }

    Cli::menu()
}
