// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Details of a single idea

use std::sync::Arc;

use anyhow::Context;
use hbcoreclient::{
    CoreClient, DataService, Idea, IdeaId, Prd, PrdListField, StoreEntityId, StoreNotification,
    TaskId,
};
use tokio::sync::watch;
use tokio_stream::{Stream, wrappers::WatchStream};
use tokio_util::sync::CancellationToken;

use crate::{
    store::IdeaBankStore,
    util::{CubitContext, CubitCore, spawn_store_notifications_loop},
};

use super::prd_editor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaDetailsState {
    /// `None` if the idea does not exist (anymore).
    pub idea: Option<Idea>,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub has_prd: bool,
    pub has_stack: bool,
}

pub struct IdeaDetailsCubit<D: DataService> {
    core: CubitCore<IdeaDetailsState>,
    context: IdeaDetailsContext<CoreClient<D>>,
}

impl<D: DataService> IdeaDetailsCubit<D> {
    /// Must be called within a Tokio runtime.
    pub fn new(client: &CoreClient<D>, idea_id: IdeaId) -> Self {
        let core = CubitCore::new();
        let context = IdeaDetailsContext::new(client.clone(), idea_id, core.state_tx().clone());
        context.spawn(client.subscribe(), core.cancellation_token().clone());
        Self { core, context }
    }

    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    pub fn close(&mut self) {
        self.core.close();
    }

    pub fn state(&self) -> IdeaDetailsState {
        self.core.state()
    }

    pub fn stream(&self) -> WatchStream<IdeaDetailsState> {
        self.core.stream()
    }

    pub async fn toggle_task(&self, task_id: TaskId) -> anyhow::Result<()> {
        IdeaBankStore::toggle_task(&self.context.store, self.context.idea_id, task_id).await
    }

    pub async fn add_prd_list_item(&self, field: PrdListField) -> anyhow::Result<()> {
        self.context
            .edit_prd(|prd| prd_editor::add_list_item(prd, field))
            .await
    }

    pub async fn update_prd_list_item(
        &self,
        field: PrdListField,
        index: usize,
        value: String,
    ) -> anyhow::Result<()> {
        self.context
            .edit_prd(|prd| prd_editor::update_list_item(prd, field, index, value))
            .await
    }
}

#[derive(Clone)]
struct IdeaDetailsContext<S> {
    store: S,
    idea_id: IdeaId,
    state_tx: watch::Sender<IdeaDetailsState>,
}

impl<S: IdeaBankStore + Clone> IdeaDetailsContext<S> {
    fn new(store: S, idea_id: IdeaId, state_tx: watch::Sender<IdeaDetailsState>) -> Self {
        Self {
            store,
            idea_id,
            state_tx,
        }
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

impl<S: IdeaBankStore> IdeaDetailsContext<S> {
    async fn edit_prd(
        &self,
        edit: impl FnOnce(&Prd) -> hbcoreclient::PrdUpdate,
    ) -> anyhow::Result<()> {
        let prd = self
            .store
            .prd(self.idea_id)
            .unwrap_or_else(|| Prd::empty(self.idea_id));
        self.store
            .update_prd(self.idea_id, edit(&prd))
            .await
            .with_context(|| format!("Failed to edit the PRD of idea {}", self.idea_id))
    }
}

impl<S: IdeaBankStore> CubitContext for IdeaDetailsContext<S> {
    fn load_and_emit_state(&self) {
        let idea = self.store.idea(self.idea_id);
        let state = IdeaDetailsState {
            completed_tasks: idea.as_ref().map_or(0, Idea::completed_tasks),
            total_tasks: idea.as_ref().map_or(0, |idea| idea.tasks.len()),
            has_prd: self.store.prd(self.idea_id).is_some(),
            has_stack: self.store.stack(self.idea_id).is_some(),
            idea,
        };
        self.state_tx.send_replace(state);
    }

    fn is_affected_by(&self, notification: &StoreNotification) -> bool {
        let idea_id = self.idea_id;
        notification.ops.iter().any(|(id, op)| {
            !op.is_empty()
                && matches!(
                    id,
                    StoreEntityId::Idea(changed)
                        | StoreEntityId::Prd(changed)
                        | StoreEntityId::Stack(changed) if *changed == idea_id
                )
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use chrono::{DateTime, TimeZone, Utc};
    use hbcoreclient::{IdeaSections, IdeaStatus, StoreOperation, Task};
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::store::MockIdeaBankStore;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn idea_id() -> IdeaId {
        IdeaId::new(Uuid::from_u128(1))
    }

    fn task(n: u128, completed: bool) -> Task {
        Task {
            id: TaskId::new(Uuid::from_u128(n)),
            text: format!("Task {n}"),
            completed,
            created_at: now(),
        }
    }

    fn idea() -> Idea {
        Idea {
            id: idea_id(),
            title: "Focus Timer".to_owned(),
            description: String::new(),
            tags: Vec::new(),
            status: IdeaStatus::Building,
            level: 3,
            progress: 40,
            hackathon_id: None,
            sections: IdeaSections::default(),
            updated_at: now(),
            tasks: vec![task(1, true), task(2, false), task(3, true)],
            comments: Vec::new(),
        }
    }

    fn context(store: MockIdeaBankStore) -> IdeaDetailsContext<MockIdeaBankStore> {
        let (state_tx, _) = watch::channel(IdeaDetailsState::default());
        IdeaDetailsContext {
            store,
            idea_id: idea_id(),
            state_tx,
        }
    }

    #[test]
    fn summarizes_tasks_and_planning() {
        let mut store = MockIdeaBankStore::new();
        store
            .expect_idea()
            .with(eq(idea_id()))
            .returning(|_| Some(idea()));
        store
            .expect_prd()
            .returning(|idea_id| Some(Prd::empty(idea_id)));
        store.expect_stack().returning(|_| None);
        let context = context(store);

        context.load_and_emit_state();

        let state = context.state_tx.borrow().clone();
        assert_eq!(state.completed_tasks, 2);
        assert_eq!(state.total_tasks, 3);
        assert!(state.has_prd);
        assert!(!state.has_stack);
        assert_eq!(state.idea.unwrap().title, "Focus Timer");
    }

    #[test]
    fn only_own_changes_are_relevant() {
        let context = context(MockIdeaBankStore::new());
        let notification = |id: StoreEntityId| StoreNotification {
            ops: BTreeMap::from([(id, StoreOperation::Update.into())]),
            toasts: Vec::new(),
        };
        assert!(context.is_affected_by(&notification(StoreEntityId::Idea(idea_id()))));
        assert!(context.is_affected_by(&notification(StoreEntityId::Stack(idea_id()))));
        let other = IdeaId::new(Uuid::from_u128(2));
        assert!(!context.is_affected_by(&notification(StoreEntityId::Prd(other))));
        assert!(!context.is_affected_by(&notification(StoreEntityId::Members)));
    }

    #[tokio::test]
    async fn adding_a_list_item_starts_from_an_empty_prd() {
        let mut store = MockIdeaBankStore::new();
        store.expect_prd().returning(|_| None);
        store
            .expect_update_prd()
            .withf(|idea_id, update| {
                *idea_id == self::idea_id() && update.risks == Some(vec![String::new()])
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let context = context(store);

        context
            .edit_prd(|prd| prd_editor::add_list_item(prd, PrdListField::Risks))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_prd_edit_carries_context() {
        let mut store = MockIdeaBankStore::new();
        store.expect_prd().returning(|_| None);
        store
            .expect_update_prd()
            .returning(|_, _| Err(anyhow::anyhow!("permission denied")));
        let context = context(store);

        let error = context
            .edit_prd(|prd| prd_editor::add_list_item(prd, PrdListField::MvpScope))
            .await
            .unwrap_err();
        assert!(error.to_string().starts_with("Failed to edit the PRD"));
    }
}
