use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use songbook_client::{api::HttpCatalogClient, state::Dispatcher};
use songbook_core::{
    config::Settings,
    logger::init_logger,
    termination::{Interrupted, create_termination},
};

mod handlers;

use handlers::{Command, utils::WriteAdapter};

/// Options configurable via the CLI.
#[derive(Debug, Parser)]
#[command(name = "songbook", version = env!("CARGO_PKG_VERSION"), about)]
struct Flags {
    /// Base URL of the catalog API, overrides `client.base_url` from the config file
    #[clap(long, env = "SONGBOOK_API_URL", value_hint = clap::ValueHint::Url)]
    base_url: Option<String>,
    /// config file path
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// log level
    #[clap(long, default_value = "warn")]
    log_level: log::LevelFilter,
    /// subcommand to run
    #[clap(subcommand)]
    subcommand: Command,
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Flags::command().debug_assert();
}

fn main() -> anyhow::Result<()> {
    let flags = Flags::parse();

    init_logger(flags.log_level);

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };
    let settings = Settings::init(config_file, None, None)?;
    let base_url = flags.base_url.unwrap_or(settings.client.base_url);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let api = Arc::new(HttpCatalogClient::new(base_url));

        let (terminator, interrupt_rx) = create_termination();
        let (dispatcher, store) = Dispatcher::new();
        let dispatcher = tokio::spawn(dispatcher.main_loop(api, interrupt_rx.resubscribe()));

        let mut stdout_adapter = WriteAdapter(std::io::stdout());
        let mut stderr_adapter = WriteAdapter(std::io::stderr());

        let result = flags
            .subcommand
            .handle(
                &store,
                settings.client.page_size,
                &mut stdout_adapter,
                &mut stderr_adapter,
            )
            .await;

        terminator.terminate(Interrupted::UserInt)?;
        dispatcher.await??;

        result
    })
}
