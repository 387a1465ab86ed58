//! Runs the side effects of intents against the catalog.
//!
//! Every intent gets its own task, so intents may interleave. Results only reach the state as
//! actions sent through the [`Store`].

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use songbook_core::termination::{InterruptReceiver, Interrupted};

use crate::api::{ApiError, CatalogApi};

use super::{
    action::{Action, Intent},
    store::{InFlightGuard, Store},
};

pub(super) async fn effects_loop<A: CatalogApi>(
    store: Store,
    api: Arc<A>,
    mut intent_rx: UnboundedReceiver<(Intent, InFlightGuard)>,
    mut interrupt_rx: InterruptReceiver,
) -> anyhow::Result<Interrupted> {
    loop {
        tokio::select! {
            Some((intent, guard)) = intent_rx.recv() => {
                store.apply(intent.request());
                tokio::spawn(run_effect(store.clone(), api.clone(), intent, guard));
            },
            // Catch and handle interrupt signal to gracefully shutdown
            Ok(interrupted) = interrupt_rx.wait() => {
                break Ok(interrupted);
            },
            else => break Err(anyhow::anyhow!("the effect coordinator lost all of its inputs")),
        }
    }
}

/// Run one intent to completion.
///
/// `_guard` is held until every action and follow-up intent of this effect has been handed to
/// the store.
async fn run_effect<A: CatalogApi>(store: Store, api: Arc<A>, intent: Intent, _guard: InFlightGuard) {
    match intent {
        Intent::FetchSongs { page, limit } => match api.list(page, limit).await {
            Ok(page) => store.apply(Action::FetchSongsSuccess(page)),
            Err(e) => store.apply(Action::FetchSongsFailure(failure_message(
                &e,
                "Failed to fetch songs",
            ))),
        },
        Intent::CreateSong(song) => match api.create(song).await {
            Ok(created) => {
                store.apply(Action::CreateSongSuccess(created));
                store.apply(Action::ClearError);
                refetch(&store);
            }
            Err(e) => store.apply(Action::CreateSongFailure(create_failure_message(&e))),
        },
        Intent::DeleteSong(id) => match api.delete(id.clone()).await {
            Ok(()) => {
                store.apply(Action::DeleteSongSuccess(id));
                refetch(&store);
            }
            Err(e) => store.apply(Action::DeleteSongFailure(failure_message(
                &e,
                "Failed to delete song",
            ))),
        },
        Intent::UpdateSong { id, changes } => match api.update(id, changes).await {
            Ok(updated) => store.apply(Action::UpdateSongSuccess(updated)),
            Err(e) => store.apply(Action::UpdateSongFailure(failure_message(
                &e,
                "Failed to update song",
            ))),
        },
        Intent::FetchMetadata => match api.metadata().await {
            Ok(metadata) => store.apply(Action::FetchMetadataSuccess(metadata)),
            Err(e) => store.apply(Action::FetchMetadataFailure(failure_message(
                &e,
                "Failed to fetch metadata",
            ))),
        },
    }
}

/// Reload the metadata and the page the client is currently looking at.
fn refetch(store: &Store) {
    let (page, limit) = store.state().current_page();
    store.dispatch(Intent::FetchMetadata);
    store.dispatch(Intent::FetchSongs { page, limit });
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    let message = error.to_string();
    if message.is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

fn create_failure_message(error: &ApiError) -> String {
    let message = failure_message(error, "Failed to create song");
    if message.contains("409") {
        "Song already exists".to_owned()
    } else {
        message
    }
}
