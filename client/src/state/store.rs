//! The handle callers use to read and change the songs state.

use std::sync::Arc;

use tokio::sync::{
    mpsc::{UnboundedReceiver, UnboundedSender},
    watch,
};

use songbook_core::termination::{InterruptReceiver, Interrupted};

use super::{
    action::{Action, Intent},
    reducer::SongsState,
};

/// Counts the intents and actions that are not reflected in the state yet.
#[derive(Clone, Debug)]
pub(crate) struct InFlight {
    count: Arc<watch::Sender<usize>>,
}

/// One unit of outstanding work, released on drop.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    count: Arc<watch::Sender<usize>>,
}

impl InFlight {
    fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            count: Arc::new(count),
        }
    }

    pub(crate) fn begin(&self) -> InFlightGuard {
        self.count.send_modify(|count| *count += 1);
        InFlightGuard {
            count: self.count.clone(),
        }
    }

    async fn wait_idle(&self) {
        let mut count = self.count.subscribe();
        // can't fail, we are holding the sender
        let _ = count.wait_for(|count| *count == 0).await;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

/// A cheap, cloneable handle to the songs state.
///
/// Changes only happen by dispatching an [`Intent`], the state itself is only ever written by the
/// reducer task started by [`super::Dispatcher::main_loop`].
#[derive(Clone, Debug)]
pub struct Store {
    intent_tx: UnboundedSender<(Intent, InFlightGuard)>,
    action_tx: UnboundedSender<(Action, InFlightGuard)>,
    state_rx: watch::Receiver<SongsState>,
    in_flight: InFlight,
}

impl Store {
    pub(super) fn new(
        intent_tx: UnboundedSender<(Intent, InFlightGuard)>,
        action_tx: UnboundedSender<(Action, InFlightGuard)>,
        state_rx: watch::Receiver<SongsState>,
    ) -> Self {
        Self {
            intent_tx,
            action_tx,
            state_rx,
            in_flight: InFlight::new(),
        }
    }

    /// Ask for something to be done, the result shows up in the state later.
    pub fn dispatch(&self, intent: Intent) {
        let guard = self.in_flight.begin();
        if let Err(e) = self.intent_tx.send((intent, guard)) {
            log::warn!("the store is shut down, dropping {:?}", e.0.0);
        }
    }

    /// Hand an action to the reducer.
    pub(crate) fn apply(&self, action: Action) {
        let guard = self.in_flight.begin();
        if let Err(e) = self.action_tx.send((action, guard)) {
            log::warn!("the store is shut down, dropping {:?}", e.0.0);
        }
    }

    /// The latest snapshot of the state.
    #[must_use]
    pub fn state(&self) -> SongsState {
        self.state_rx.borrow().clone()
    }

    /// A receiver that is notified of every new snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SongsState> {
        self.state_rx.clone()
    }

    /// Resolves once every dispatched intent, including the ones it triggered, has run and its
    /// actions are reflected in the state.
    pub async fn wait_idle(&self) {
        self.in_flight.wait_idle().await;
    }
}

/// Apply actions to the state, in the order they were sent, until interrupted.
pub(super) async fn reducer_loop(
    mut action_rx: UnboundedReceiver<(Action, InFlightGuard)>,
    state_tx: watch::Sender<SongsState>,
    mut interrupt_rx: InterruptReceiver,
) -> anyhow::Result<Interrupted> {
    loop {
        tokio::select! {
            Some((action, guard)) = action_rx.recv() => {
                log::trace!("reducing {action:?}");
                state_tx.send_modify(|state| state.reduce(action));
                drop(guard);
            },
            // Catch and handle interrupt signal to gracefully shutdown
            Ok(interrupted) = interrupt_rx.wait() => {
                break Ok(interrupted);
            },
            else => break Err(anyhow::anyhow!("the reducer lost all of its inputs")),
        }
    }
}
