// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! PRDs and tech stacks of ideas.

use hbcommon::{identifiers::IdeaId, stack::StackCategory};
use tracing::error;

use crate::{
    prds::{Prd, PrdUpdate},
    service::DataService,
    stacks::{StackUpdate, TechStack},
    store::StoreEntityId,
};

use super::{CoreClient, StoreError};

impl<S: DataService> CoreClient<S> {
    /// Merges `update` into the PRD of an idea, creating the PRD if needed.
    ///
    /// The change is visible immediately and reverted if the service rejects it.
    pub async fn update_prd(&self, idea_id: IdeaId, update: PrdUpdate) -> Result<(), StoreError> {
        let previous = self.with_state_and_notifier(|state, notifier| {
            let previous = state.prds.clone();
            state
                .prds
                .entry(idea_id)
                .or_insert_with(|| Prd::empty(idea_id))
                .apply(&update);
            notifier.update(StoreEntityId::Prd(idea_id));
            previous
        });

        let changes = update.to_changes(idea_id);
        let row = match self.service().upsert_prd(&changes).await {
            Ok(row) => row,
            Err(error) => {
                error!(%idea_id, %error, "Failed to save PRD changes");
                self.with_state_and_notifier(|state, notifier| {
                    state.prds = previous;
                    notifier
                        .update(StoreEntityId::Prd(idea_id))
                        .error("Failed to save PRD changes");
                });
                return Err(error.into());
            }
        };

        self.with_state_and_notifier(|state, notifier| {
            state.prds.insert(idea_id, row.into());
            notifier.update(StoreEntityId::Prd(idea_id));
        });
        Ok(())
    }

    /// Merges `update` into the tech stack of an idea, creating the stack if needed.
    ///
    /// The change is visible immediately and reverted if the service rejects it.
    pub async fn update_stack(
        &self,
        idea_id: IdeaId,
        update: StackUpdate,
    ) -> Result<(), StoreError> {
        let previous = self.with_state_and_notifier(|state, notifier| {
            let previous = state.stacks.clone();
            state
                .stacks
                .entry(idea_id)
                .or_insert_with(|| TechStack::empty(idea_id))
                .apply(&update);
            notifier.update(StoreEntityId::Stack(idea_id));
            previous
        });

        let changes = update.to_changes(idea_id);
        let row = match self.service().upsert_tech_stack(&changes).await {
            Ok(row) => row,
            Err(error) => {
                error!(%idea_id, %error, "Failed to save stack");
                self.with_state_and_notifier(|state, notifier| {
                    state.stacks = previous;
                    notifier
                        .update(StoreEntityId::Stack(idea_id))
                        .error("Failed to save stack");
                });
                return Err(error.into());
            }
        };

        self.with_state_and_notifier(|state, notifier| {
            state.stacks.insert(idea_id, row.into());
            notifier.update(StoreEntityId::Stack(idea_id));
        });
        Ok(())
    }

    /// Adds `item` to a category of the idea's stack, or removes it if already chosen.
    pub async fn toggle_stack_item(
        &self,
        idea_id: IdeaId,
        category: StackCategory,
        item: &str,
    ) -> Result<(), StoreError> {
        let items = self
            .stack(idea_id)
            .unwrap_or_else(|| TechStack::empty(idea_id))
            .toggled(category, item);
        self.update_stack(idea_id, StackUpdate::with_category(category, items))
            .await
    }
}
