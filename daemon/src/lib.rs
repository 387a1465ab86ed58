//----------------------------------------------------------------------------------------- std lib
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    sync::Arc,
};
//--------------------------------------------------------------------------------- other libraries
use log::{error, info};
use tokio::net::TcpListener;
//-------------------------------------------------------------------------------- SONGBOOK libraries
use songbook_core::{
    config::Settings,
    logger::{init_logger, init_tracing},
    termination::{InterruptReceiver, create_termination},
};
use songbook_storage::db::init_database;

pub mod controller;
pub mod errors;
pub mod services;
#[cfg(test)]
pub mod test_utils;

pub use controller::router;

/// Run the daemon
///
/// also initializes the logger, database, and termination handling.
///
/// # Arguments
///
/// * `settings` - The settings to use.
/// * `data_dir` - where the embedded database lives if `settings.daemon.db_url` is unset.
///
/// # Errors
///
/// If the database cannot be opened, or the port cannot be bound, an error is returned.
#[inline]
pub async fn start_daemon(settings: Settings, data_dir: &Path) -> anyhow::Result<()> {
    // Initialize the logger, database, and tracing.
    init_logger(settings.daemon.log_level);
    tracing::subscriber::set_global_default(init_tracing())?;

    let db_url = settings.daemon.database_url(data_dir);
    let db = match init_database(
        &db_url,
        &settings.daemon.namespace,
        &settings.daemon.database,
    )
    .await
    {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to open the database at {db_url}: {e}");
            anyhow::bail!("Failed to open the database at {db_url}: {e}");
        }
    };

    // initialize the termination handler
    let (_terminator, interrupt_rx) = create_termination();

    let server_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), settings.daemon.port);
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to start server: {e}");
            anyhow::bail!("Failed to start server: {e}");
        }
    };
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, router(db), interrupt_rx).await
}

/// Serve the catalog on `listener` until an interrupt is received.
///
/// # Errors
///
/// Fails if the server stops because of an I/O error.
#[inline]
pub async fn serve(
    listener: TcpListener,
    app: axum::Router,
    mut interrupt_rx: InterruptReceiver,
) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            match interrupt_rx.wait().await {
                Ok(interrupted) => info!("Stopping the server ({interrupted:?})"),
                Err(e) => error!("Lost the termination channel, stopping the server: {e}"),
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use rstest::rstest;
    use songbook_core::termination::{Interrupted, termination_channel};
    use songbook_storage::test_utils::init_test_database;

    #[rstest]
    #[timeout(Duration::from_secs(5))]
    #[tokio::test]
    async fn test_serve_stops_on_interrupt() -> anyhow::Result<()> {
        test_utils::init();
        let db = Arc::new(init_test_database().await?);
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (terminator, interrupt_rx) = termination_channel();

        let handle = tokio::spawn(serve(listener, router(db), interrupt_rx));

        // the server is up
        let stream = tokio::net::TcpStream::connect(addr).await?;
        drop(stream);

        terminator.terminate(Interrupted::UserInt)?;
        handle.await??;
        Ok(())
    }
}
