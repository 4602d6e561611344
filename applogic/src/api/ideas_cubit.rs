// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Idea bank feature: the list of ideas with search and status filter

use std::sync::Arc;

use hbcoreclient::{CoreClient, DataService, Idea, IdeaStatus, StoreEntityId, StoreNotification};
use tokio::sync::watch;
use tokio_stream::{Stream, wrappers::WatchStream};
use tokio_util::sync::CancellationToken;

use crate::{
    store::IdeaBankStore,
    util::{CubitContext, CubitCore, spawn_store_notifications_loop},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdeaFilter {
    /// Matched case-insensitively against title and description.
    pub search: String,
    /// `None` shows all statuses.
    pub status: Option<IdeaStatus>,
}

impl IdeaFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        if self.status.is_some_and(|status| status != idea.status) {
            return false;
        }
        let search = self.search.trim().to_lowercase();
        search.is_empty()
            || idea.title.to_lowercase().contains(&search)
            || idea.description.to_lowercase().contains(&search)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeasState {
    pub filter: IdeaFilter,
    /// The ideas matching the filter, newest first.
    pub ideas: Vec<Idea>,
}

pub struct IdeasCubit<D: DataService> {
    core: CubitCore<IdeasState>,
    context: IdeasContext<CoreClient<D>>,
}

impl<D: DataService> IdeasCubit<D> {
    /// Must be called within a Tokio runtime.
    pub fn new(client: &CoreClient<D>) -> Self {
        let core = CubitCore::new();
        let context = IdeasContext::new(client.clone(), core.state_tx().clone());
        context.spawn(client.subscribe(), core.cancellation_token().clone());
        Self { core, context }
    }

    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    pub fn close(&mut self) {
        self.core.close();
    }

    pub fn state(&self) -> IdeasState {
        self.core.state()
    }

    pub fn stream(&self) -> WatchStream<IdeasState> {
        self.core.stream()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.context.set_filter(|filter| filter.search = search.into());
    }

    pub fn set_status_filter(&self, status: Option<IdeaStatus>) {
        self.context.set_filter(|filter| filter.status = status);
    }
}

#[derive(Clone)]
struct IdeasContext<S> {
    store: S,
    state_tx: watch::Sender<IdeasState>,
}

impl<S: IdeaBankStore + Clone> IdeasContext<S> {
    fn new(store: S, state_tx: watch::Sender<IdeasState>) -> Self {
        Self { store, state_tx }
    }

    fn spawn(
        &self,
        store_notifications: impl Stream<Item = Arc<StoreNotification>> + Send + Unpin + 'static,
        stop: CancellationToken,
    ) {
        self.load_and_emit_state();
        spawn_store_notifications_loop(self.clone(), store_notifications, stop);
    }
}

impl<S: IdeaBankStore> IdeasContext<S> {
    fn set_filter(&self, f: impl FnOnce(&mut IdeaFilter)) {
        self.state_tx.send_modify(|state| f(&mut state.filter));
        self.load_and_emit_state();
    }
}

impl<S: IdeaBankStore> CubitContext for IdeasContext<S> {
    fn load_and_emit_state(&self) {
        let filter = self.state_tx.borrow().filter.clone();
        let mut ideas = self.store.ideas();
        ideas.retain(|idea| filter.matches(idea));
        self.state_tx.send_modify(|state| state.ideas = ideas);
    }

    fn is_affected_by(&self, notification: &StoreNotification) -> bool {
        notification
            .ops
            .iter()
            .any(|(id, op)| matches!(id, StoreEntityId::Idea(_)) && !op.is_empty())
    }
}
