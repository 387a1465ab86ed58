//----------------------------------------------------------------------------------------- std lib
use std::io::Write;
use std::time::Instant;
//--------------------------------------------------------------------------------- other libraries
use env_logger::fmt::style::{AnsiColor, Style};
use log::info;
use once_cell::sync::Lazy;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _};

// This will get initialized below.
/// Returns the init [`Instant`]
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// The filter used when `RUST_LOG` is not set:
/// everything but the songbook crates is silenced.
#[must_use]
pub fn default_log_filter(filter: log::LevelFilter) -> String {
    format!("off,songbook={filter}")
}

//---------------------------------------------------------------------------------------------------- Logger init function
#[allow(clippy::module_name_repetitions)]
/// Initializes the logger.
///
/// This enables console logging on all the internals of `songbook`.
///
/// Functionality is provided by [`log`].
///
/// The levels are:
/// - ERROR
/// - WARN
/// - INFO
/// - DEBUG
/// - TRACE
///
/// # Panics
/// This must only be called _once_.
pub fn init_logger(filter: log::LevelFilter) {
    // Initialize timer.
    let now = Lazy::force(&INIT_INSTANT);

    let env = std::env::var("RUST_LOG").unwrap_or_default();

    let mut builder = env_logger::Builder::new();
    if env.is_empty() {
        builder.parse_filters(&default_log_filter(filter));
    } else {
        builder.parse_filters(&env);
    }

    builder
        .format(move |buf, record| {
            let (color, level) = match record.level() {
                log::Level::Debug => (AnsiColor::Blue, "D"),
                log::Level::Trace => (AnsiColor::Magenta, "T"),
                log::Level::Info => (AnsiColor::White, "I"),
                log::Level::Warn => (AnsiColor::Yellow, "W"),
                log::Level::Error => (AnsiColor::Red, "E"),
            };
            let level_style = Style::new().fg_color(Some(color.into())).bold();
            let dimmed = Style::new().dimmed();

            writeln!(
                buf,
                // Longest PATH in the repo: `storage/src/db/queries/generic.rs` - `33` characters
                // Longest file in the repo: `client/src/state/effects.rs`      - `4` digits
                //
                //      Longest PATH ---|        |--- Longest file
                //                      |        |
                //                      v        v
                "| {level_style}{level}{level_style:#} | {dimmed}{}{dimmed:#} | {dimmed}{: >33}{dimmed:#} @ {dimmed}{: <4}{dimmed:#} | {}",
                crate::format_duration(&now.elapsed()),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .write_style(env_logger::WriteStyle::Auto)
        .init();

    if env.is_empty() {
        info!("Log Level (Flag) ... {filter}");
    } else {
        info!("Log Level (RUST_LOG) ... {env}");
    }
}

/// Initializes the tracing layer.
///
/// Only spans and events from the songbook crates are recorded.
#[must_use]
pub fn init_tracing() -> impl tracing::Subscriber + Send + Sync {
    #[cfg(not(feature = "verbose_tracing"))]
    let filter = EnvFilter::builder().parse_lossy("off,songbook=trace");
    #[cfg(feature = "verbose_tracing")]
    let filter = EnvFilter::builder().parse_lossy("trace,h2=off,hyper=off");

    tracing_subscriber::registry().with(filter)
}
