//! Graceful shutdown plumbing.
//!
//! A [`Terminator`] broadcasts why the process should stop, every long running loop holds an
//! [`InterruptReceiver`] and `select!`s on it next to its regular work.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[cfg(unix)]
use tokio::signal::unix::signal;
use tokio::sync::broadcast::{self, error::RecvError};

/// Why the application is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    OsSigInt,
    OsSigQuit,
    OsSigTerm,
    UserInt,
}

/// After this many signals the process exits without waiting for a graceful shutdown.
const FORCE_QUIT_THRESHOLD: u8 = 3;

/// The receiving side of the shutdown broadcast.
///
/// Clones made with [`InterruptReceiver::resubscribe`] share the "stopped" flag,
/// so any of them can tell whether a shutdown was already observed.
#[derive(Debug)]
pub struct InterruptReceiver {
    interrupt_rx: broadcast::Receiver<Interrupted>,
    stopped: Arc<AtomicBool>,
}

impl InterruptReceiver {
    #[must_use]
    #[inline]
    pub fn new(interrupt_rx: broadcast::Receiver<Interrupted>) -> Self {
        Self {
            interrupt_rx,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wait until a shutdown is requested.
    ///
    /// # Errors
    ///
    /// Fails if every [`Terminator`] has been dropped.
    #[inline]
    pub async fn wait(&mut self) -> Result<Interrupted, RecvError> {
        let interrupted = self.interrupt_rx.recv().await?;
        self.stopped.store(true, Ordering::SeqCst);
        Ok(interrupted)
    }

    #[must_use]
    #[inline]
    pub fn resubscribe(&self) -> Self {
        Self {
            interrupt_rx: self.interrupt_rx.resubscribe(),
            stopped: self.stopped.clone(),
        }
    }

    /// Whether a shutdown has been observed by this receiver or one of its resubscriptions.
    #[must_use]
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// The sending side of the shutdown broadcast.
#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    #[must_use]
    #[inline]
    pub const fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    /// Ask everything holding an [`InterruptReceiver`] to shut down.
    ///
    /// # Errors
    ///
    /// Fails if there are no receivers left.
    #[inline]
    pub fn terminate(&self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

/// A connected [`Terminator`] / [`InterruptReceiver`] pair that does not listen for OS signals.
#[must_use]
#[inline]
pub fn termination_channel() -> (Terminator, InterruptReceiver) {
    let (tx, rx) = broadcast::channel(2);
    (Terminator::new(tx), InterruptReceiver::new(rx))
}

#[cfg(unix)]
async fn terminate_by_signal(terminator: Terminator) {
    use tokio::signal::unix::SignalKind;

    let (mut interrupt_signal, mut term_signal, mut quit_signal) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
        signal(SignalKind::quit()),
    ) {
        (Ok(int), Ok(term), Ok(quit)) => (int, term, quit),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            log::error!("failed to register signal handlers: {e}");
            return;
        }
    };

    let mut kill_count = 0;

    loop {
        // if we've received enough signals, the application isn't shutting down on its own
        if kill_count >= FORCE_QUIT_THRESHOLD {
            log::warn!(
                "Received {FORCE_QUIT_THRESHOLD} signals, forcefully terminating the application"
            );
            std::process::exit(1);
        }

        let interrupted = tokio::select! {
            _ = interrupt_signal.recv() => Interrupted::OsSigInt,
            _ = term_signal.recv() => Interrupted::OsSigTerm,
            _ = quit_signal.recv() => Interrupted::OsSigQuit,
            _ = tokio::signal::ctrl_c() => Interrupted::UserInt,
        };

        log::info!("Received {interrupted:?}, shutting down");
        if let Err(e) = terminator.terminate(interrupted) {
            log::warn!("failed to send interrupt signal: {e}");
        }
        kill_count += 1;
    }
}

#[cfg(not(unix))]
async fn terminate_by_signal(terminator: Terminator) {
    // On non-unix systems, ctrl_c is the only signal we can listen for.
    let mut kill_count = 0;

    loop {
        if kill_count >= FORCE_QUIT_THRESHOLD {
            log::warn!(
                "Received {FORCE_QUIT_THRESHOLD} signals, forcefully terminating the application"
            );
            std::process::exit(1);
        }

        if tokio::signal::ctrl_c().await.is_err() {
            log::error!("failed to listen for ctrl-c");
            return;
        }

        if let Err(e) = terminator.terminate(Interrupted::UserInt) {
            log::warn!("failed to send interrupt signal: {e}");
        }
        kill_count += 1;
    }
}

/// create a broadcast channel for retrieving the application kill signal,
/// and start listening for OS signals on the current tokio runtime.
///
/// # Panics
///
/// Panics if called outside of a tokio runtime.
#[allow(clippy::module_name_repetitions)]
#[must_use]
#[inline]
pub fn create_termination() -> (Terminator, InterruptReceiver) {
    let (terminator, interrupt) = termination_channel();

    tokio::spawn(terminate_by_signal(terminator.clone()));

    (terminator, interrupt)
}
