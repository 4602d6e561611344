// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use hbcoreclient::StoreNotification;
use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt, wrappers::WatchStream};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// State and lifecycle shared by all cubits.
///
/// The state is published on a `watch` channel. Closing the cubit stops its background task.
#[derive(Debug)]
pub(crate) struct CubitCore<S> {
    state_tx: watch::Sender<S>,
    cancel: CancellationToken,
}

impl<S> CubitCore<S>
where
    S: Clone + Default + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        let (state_tx, _) = watch::channel(S::default());
        Self {
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    pub(crate) fn state_tx(&self) -> &watch::Sender<S> {
        &self.state_tx
    }

    pub(crate) fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn close(&mut self) {
        self.cancel.cancel();
    }

    pub(crate) fn state(&self) -> S {
        self.state_tx.borrow().clone()
    }

    /// The current state followed by every change.
    pub(crate) fn stream(&self) -> WatchStream<S> {
        WatchStream::new(self.state_tx.subscribe())
    }
}

impl<S> Drop for CubitCore<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Derives the state of a cubit from the store.
pub(crate) trait CubitContext: Send + Sync + 'static {
    fn load_and_emit_state(&self);

    /// Whether `notification` touches anything the state is derived from.
    fn is_affected_by(&self, notification: &StoreNotification) -> bool;
}

/// Reloads the state of `context` on every relevant store notification until `stop` is
/// cancelled or the notifications end.
pub(crate) fn spawn_store_notifications_loop(
    context: impl CubitContext,
    mut store_notifications: impl Stream<Item = Arc<StoreNotification>> + Send + Unpin + 'static,
    stop: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            let notification = tokio::select! {
                _ = stop.cancelled() => return,
                notification = store_notifications.next() => notification,
            };
            match notification {
                Some(notification) if context.is_affected_by(&notification) => {
                    context.load_and_emit_state();
                }
                Some(_) => (),
                None => {
                    debug!("Store notifications ended");
                    return;
                }
            }
        }
    });
}
