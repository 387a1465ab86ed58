//! The client side songs state, kept in sync with the catalog.
//!
//! ```text
//!  Store::dispatch(Intent) ──> effects loop ──> one task per intent ──> CatalogApi
//!                                   │                   │
//!                                   └── *Request ───────┴── *Success / *Failure
//!                                              │
//!                                              v
//!                                  reducer loop ──> watch::Sender<SongsState>
//! ```

use std::{future::Future, sync::Arc};

use tokio::sync::{mpsc, watch};

use songbook_core::termination::{InterruptReceiver, Interrupted};

use crate::api::CatalogApi;

pub mod action;
mod effects;
pub mod reducer;
pub mod store;

pub use action::{Action, Intent};
pub use reducer::SongsState;
pub use store::Store;

/// Owns the receiving ends of the store's channels until [`Dispatcher::main_loop`] runs.
pub struct Dispatcher {
    store: Store,
    intent_rx: mpsc::UnboundedReceiver<(Intent, store::InFlightGuard)>,
    action_rx: mpsc::UnboundedReceiver<(Action, store::InFlightGuard)>,
    state_tx: watch::Sender<SongsState>,
}

impl Dispatcher {
    /// Create an empty store, and the dispatcher that drives it.
    #[must_use]
    pub fn new() -> (Self, Store) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SongsState::default());

        let store = Store::new(intent_tx, action_tx, state_rx);

        let dispatcher = Self {
            store: store.clone(),
            intent_rx,
            action_rx,
            state_tx,
        };

        (dispatcher, store)
    }

    /// Run the effect coordinator and the reducer until interrupted.
    ///
    /// # Errors
    ///
    /// Fails if either loop stops for any other reason than an interrupt.
    pub fn main_loop<A: CatalogApi>(
        self,
        api: Arc<A>,
        interrupt_rx: InterruptReceiver,
    ) -> impl Future<Output = anyhow::Result<Interrupted>> + Send {
        // subscribe now, an interrupt sent before the first poll must not be missed
        let reducer = store::reducer_loop(self.action_rx, self.state_tx, interrupt_rx.resubscribe());
        let effects = effects::effects_loop(self.store, api, self.intent_rx, interrupt_rx);

        async move {
            let (interrupted, _) = tokio::try_join!(reducer, effects)?;
            Ok(interrupted)
        }
    }
}
