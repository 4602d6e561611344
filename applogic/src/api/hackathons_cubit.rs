// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Hackathons and linking ideas to them

use std::sync::Arc;

use anyhow::Context;
use hbcoreclient::{
    CoreClient, DataService, Hackathon, HackathonId, Idea, IdeaId, StoreEntityId,
    StoreNotification,
};
use tokio::sync::watch;
use tokio_stream::{Stream, wrappers::WatchStream};
use tokio_util::sync::CancellationToken;

use crate::{
    store::IdeaBankStore,
    util::{CubitContext, CubitCore, spawn_store_notifications_loop},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HackathonsState {
    pub hackathons: Vec<Hackathon>,
    pub selected: Option<HackathonId>,
    /// Ideas not yet linked to the selected hackathon; empty without a selection.
    pub linkable_ideas: Vec<Idea>,
}

/// The ideas that can be linked to `hackathon`.
pub fn linkable_ideas(ideas: Vec<Idea>, hackathon: &Hackathon) -> Vec<Idea> {
    ideas
        .into_iter()
        .filter(|idea| !hackathon.is_linked(idea.id))
        .collect()
}

pub struct HackathonsCubit<D: DataService> {
    core: CubitCore<HackathonsState>,
    context: HackathonsContext<CoreClient<D>>,
}

impl<D: DataService> HackathonsCubit<D> {
    /// Must be called within a Tokio runtime.
    pub fn new(client: &CoreClient<D>) -> Self {
        let core = CubitCore::new();
        let context = HackathonsContext::new(client.clone(), core.state_tx().clone());
        context.spawn(client.subscribe(), core.cancellation_token().clone());
        Self { core, context }
    }

    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    pub fn close(&mut self) {
        self.core.close();
    }

    pub fn state(&self) -> HackathonsState {
        self.core.state()
    }

    pub fn stream(&self) -> WatchStream<HackathonsState> {
        self.core.stream()
    }

    pub fn select_hackathon(&self, hackathon_id: Option<HackathonId>) {
        self.context.select(hackathon_id);
    }

    /// Links an idea to the selected hackathon.
    pub async fn link_idea(&self, idea_id: IdeaId) -> anyhow::Result<()> {
        self.context.link_idea(idea_id).await
    }
}

#[derive(Clone)]
struct HackathonsContext<S> {
    store: S,
    state_tx: watch::Sender<HackathonsState>,
}

impl<S: IdeaBankStore + Clone> HackathonsContext<S> {
    fn new(store: S, state_tx: watch::Sender<HackathonsState>) -> Self {
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

impl<S: IdeaBankStore> HackathonsContext<S> {
    fn select(&self, hackathon_id: Option<HackathonId>) {
        self.state_tx
            .send_modify(|state| state.selected = hackathon_id);
        self.load_and_emit_state();
    }

    async fn link_idea(&self, idea_id: IdeaId) -> anyhow::Result<()> {
        let hackathon_id = self
            .state_tx
            .borrow()
            .selected
            .context("No hackathon selected")?;
        self.store
            .link_idea_to_hackathon(hackathon_id, idea_id)
            .await
    }
}

impl<S: IdeaBankStore> CubitContext for HackathonsContext<S> {
    fn load_and_emit_state(&self) {
        let selected = self.state_tx.borrow().selected;
        let hackathons = self.store.hackathons();
        let linkable = selected
            .and_then(|id| hackathons.iter().find(|hackathon| hackathon.id == id))
            .map(|hackathon| linkable_ideas(self.store.ideas(), hackathon))
            .unwrap_or_default();
        self.state_tx.send_modify(|state| {
            state.hackathons = hackathons;
            state.linkable_ideas = linkable;
        });
    }

    fn is_affected_by(&self, notification: &StoreNotification) -> bool {
        notification.ops.iter().any(|(id, op)| {
            !op.is_empty() && matches!(id, StoreEntityId::Idea(_) | StoreEntityId::Hackathon(_))
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, TimeZone, Utc};
    use hbcoreclient::{HackathonStatus, IdeaSections, IdeaStatus};
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::store::MockIdeaBankStore;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn idea(n: u128) -> Idea {
        Idea {
            id: IdeaId::new(Uuid::from_u128(n)),
            title: format!("Idea {n}"),
            description: String::new(),
            tags: Vec::new(),
            status: IdeaStatus::Draft,
            level: 1,
            progress: 0,
            hackathon_id: None,
            sections: IdeaSections::default(),
            updated_at: now(),
            tasks: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn hackathon(n: u128, linked: &[u128]) -> Hackathon {
        Hackathon {
            id: HackathonId::new(Uuid::from_u128(n)),
            name: format!("Hackathon {n}"),
            deadline: now(),
            theme: String::new(),
            prizes: None,
            status: HackathonStatus::Planned,
            linked_idea_ids: linked
                .iter()
                .map(|n| IdeaId::new(Uuid::from_u128(*n)))
                .collect(),
        }
    }

    fn context(store: MockIdeaBankStore) -> HackathonsContext<MockIdeaBankStore> {
        let (state_tx, _) = watch::channel(HackathonsState::default());
        HackathonsContext { store, state_tx }
    }

    #[test]
    fn linkable_ideas_exclude_linked_ones() {
        let ideas = vec![idea(1), idea(2), idea(3)];
        let linkable = linkable_ideas(ideas, &hackathon(10, &[2]));
        let ids: Vec<IdeaId> = linkable.iter().map(|idea| idea.id).collect();
        assert_eq!(ids, [idea(1).id, idea(3).id]);
    }

    #[test]
    fn selection_drives_linkable_ideas() {
        let mut store = MockIdeaBankStore::new();
        store
            .expect_hackathons()
            .returning(|| vec![hackathon(10, &[1]), hackathon(11, &[])]);
        store.expect_ideas().returning(|| vec![idea(1), idea(2)]);
        let context = context(store);

        context.load_and_emit_state();
        assert_eq!(context.state_tx.borrow().hackathons.len(), 2);
        assert!(context.state_tx.borrow().linkable_ideas.is_empty());

        context.select(Some(HackathonId::new(Uuid::from_u128(10))));
        assert_eq!(context.state_tx.borrow().linkable_ideas, [idea(2)]);

        context.select(Some(HackathonId::new(Uuid::from_u128(99))));
        assert!(context.state_tx.borrow().linkable_ideas.is_empty());
    }

    #[tokio::test]
    async fn link_requires_a_selection() {
        let mut store = MockIdeaBankStore::new();
        store.expect_hackathons().returning(|| vec![hackathon(10, &[])]);
        store.expect_ideas().returning(|| vec![idea(1)]);
        store
            .expect_link_idea_to_hackathon()
            .with(
                eq(HackathonId::new(Uuid::from_u128(10))),
                eq(IdeaId::new(Uuid::from_u128(1))),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        let context = context(store);

        let error = context.link_idea(idea(1).id).await.unwrap_err();
        assert_eq!(error.to_string(), "No hackathon selected");

        context.select(Some(HackathonId::new(Uuid::from_u128(10))));
        context.link_idea(idea(1).id).await.unwrap();
    }
}
