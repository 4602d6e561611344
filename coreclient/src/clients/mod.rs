// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use hbcommon::identifiers::{HackathonId, IdeaId};
use parking_lot::RwLock;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tracing::warn;

use crate::{
    activities::Activity,
    hackathons::Hackathon,
    ideas::Idea,
    members::Member,
    prds::Prd,
    service::DataService,
    stacks::TechStack,
    store::{
        AppState, StoreNotification, StoreNotificationsSender, StoreNotifier,
        store_notifications_channel,
    },
};

pub use auth::{SignedMessage, WalletSigner};
pub use error::StoreError;

mod auth;
mod error;
mod hackathons;
mod ideas;
mod load;
mod planning;
mod tasks;

/// Client-side mirror of the idea bank.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Debug)]
pub struct CoreClient<S> {
    inner: Arc<CoreClientInner<S>>,
}

impl<S> Clone for CoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[derive(Debug)]
struct CoreClientInner<S> {
    service: S,
    state: RwLock<AppState>,
    store_notifications_tx: StoreNotificationsSender,
}

impl<S: DataService> CoreClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            inner: Arc::new(CoreClientInner {
                service,
                state: RwLock::new(AppState::default()),
                store_notifications_tx: store_notifications_channel(),
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    /// Changes of the state from now on.
    ///
    /// Notifications missed by a slow subscriber are skipped.
    pub fn subscribe(&self) -> impl Stream<Item = Arc<StoreNotification>> + Send + Unpin + 'static {
        BroadcastStream::new(self.inner.store_notifications_tx.subscribe()).filter_map(|res| {
            res.inspect_err(|error| warn!(%error, "Store notification subscriber lagged"))
                .ok()
        })
    }

    /// A copy of the whole state.
    pub fn state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    pub fn user(&self) -> Option<Member> {
        self.inner.state.read().user.clone()
    }

    pub fn auth_ready(&self) -> bool {
        self.inner.state.read().auth_ready
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    pub fn members(&self) -> Vec<Member> {
        self.inner.state.read().members.clone()
    }

    pub fn ideas(&self) -> Vec<Idea> {
        self.inner.state.read().ideas.clone()
    }

    pub fn idea(&self, idea_id: IdeaId) -> Option<Idea> {
        self.inner.state.read().idea(idea_id).cloned()
    }

    pub fn hackathons(&self) -> Vec<Hackathon> {
        self.inner.state.read().hackathons.clone()
    }

    pub fn hackathon(&self, hackathon_id: HackathonId) -> Option<Hackathon> {
        self.inner.state.read().hackathon(hackathon_id).cloned()
    }

    pub fn prd(&self, idea_id: IdeaId) -> Option<Prd> {
        self.inner.state.read().prds.get(&idea_id).cloned()
    }

    pub fn prds(&self) -> HashMap<IdeaId, Prd> {
        self.inner.state.read().prds.clone()
    }

    pub fn stack(&self, idea_id: IdeaId) -> Option<TechStack> {
        self.inner.state.read().stacks.get(&idea_id).cloned()
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.inner.state.read().activities.clone()
    }

    fn notifier(&self) -> StoreNotifier {
        StoreNotifier::new(self.inner.store_notifications_tx.clone())
    }

    /// Runs `f` on the locked state and publishes the changes it records.
    ///
    /// The lock is released before the notification is sent.
    fn with_state_and_notifier<T>(
        &self,
        f: impl FnOnce(&mut AppState, &mut StoreNotifier) -> T,
    ) -> T {
        let mut notifier = self.notifier();
        let value = {
            let mut state = self.inner.state.write();
            f(&mut state, &mut notifier)
        };
        notifier.notify();
        value
    }

    /// Publishes toasts without touching the state.
    fn toast(&self, f: impl FnOnce(&mut StoreNotifier)) {
        let mut notifier = self.notifier();
        f(&mut notifier);
        notifier.notify();
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
