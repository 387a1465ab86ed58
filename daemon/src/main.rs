//! This is the daemon binary that runs the songbook catalog service.
//! there are no tests or anything else in this file because the only thing it does is set up and start the daemon
//! with functions from the `songbook_daemon` library crate (which is tested).

use std::path::PathBuf;

use songbook_core::{config::Settings, get_data_dir};
use songbook_daemon::start_daemon;

use clap::Parser;

/// Options configurable via the CLI.
#[derive(Parser)]
#[command(name = "songbook-daemon", version, about = "The songbook catalog service")]
struct Flags {
    /// Sets the port number to listen on.
    #[clap(long, env = "PORT")]
    port: Option<u16>,
    /// config file path
    #[clap(long)]
    config: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = Flags::try_parse()?;

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };

    let data_dir = match get_data_dir() {
        Ok(data_dir) => data_dir,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Using a temporary directory for the database");
            std::env::temp_dir().join("songbook")
        }
    };

    let settings = Settings::init(config_file, flags.port, flags.log_level)?;

    start_daemon(settings, &data_dir).await
}
