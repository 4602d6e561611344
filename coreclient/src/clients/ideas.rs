// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbcommon::identifiers::IdeaId;
use tracing::{error, info};

use crate::{
    ideas::{Idea, IdeaUpdate, NewIdea},
    service::DataService,
};

use super::{CoreClient, StoreError};

const TITLE_REQUIRED: &str = "Idea title is required";

impl<S: DataService> CoreClient<S> {
    /// Creates an idea owned by the signed-in user.
    ///
    /// The idea is added to the state once the service has stored it.
    pub async fn add_idea(&self, new_idea: NewIdea) -> Result<IdeaId, StoreError> {
        let owner_id = self.user().map(|user| user.id);
        let Some(row) = new_idea.into_row(owner_id) else {
            self.toast(|notifier| {
                notifier.error(TITLE_REQUIRED);
            });
            return Err(StoreError::Validation(TITLE_REQUIRED));
        };

        let created = match self.service().insert_idea(&row).await {
            Ok(created) => created,
            Err(error) => {
                error!(%error, "Failed to create idea");
                self.toast(|notifier| {
                    notifier.error("Failed to create idea");
                });
                return Err(error.into());
            }
        };

        let idea = Idea::from_row(created, self.now());
        let idea_id = idea.id;
        info!(%idea_id, "Idea created");
        self.with_state_and_notifier(|state, notifier| {
            state.ideas.insert(0, idea);
            state.rebuild_links(notifier);
            notifier.add(idea_id).success("Idea created!");
        });
        Ok(idea_id)
    }

    /// Changes the fields of an idea present in `update`.
    ///
    /// The change is visible immediately and reverted if the service rejects it.
    pub async fn update_idea(&self, idea_id: IdeaId, update: IdeaUpdate) -> Result<(), StoreError> {
        let now = self.now();
        let snapshot = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.apply(&update, now);
                notifier.update(idea_id);
            }
            state.rebuild_links(notifier);
            snapshot
        });

        let changes = update.to_changes(now);
        let row = match self.service().update_idea(idea_id, &changes).await {
            Ok(row) => row,
            Err(error) => {
                error!(%idea_id, %error, "Failed to update idea");
                self.with_state_and_notifier(|state, notifier| {
                    snapshot.restore(state, notifier);
                    notifier.update(idea_id).error("Failed to update idea");
                });
                return Err(error.into());
            }
        };

        self.with_state_and_notifier(|state, notifier| {
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.merge_row(row, now);
            }
            state.rebuild_links(notifier);
            notifier.update(idea_id).success("Idea updated!");
        });
        Ok(())
    }

    /// Deletes an idea.
    ///
    /// The idea disappears immediately and comes back if the service rejects the deletion.
    pub async fn delete_idea(&self, idea_id: IdeaId) -> Result<(), StoreError> {
        let snapshot = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            state.ideas.retain(|idea| idea.id != idea_id);
            state.rebuild_links(notifier);
            notifier.remove(idea_id);
            snapshot
        });

        if let Err(error) = self.service().delete_idea(idea_id).await {
            error!(%idea_id, %error, "Failed to delete idea");
            self.with_state_and_notifier(|state, notifier| {
                snapshot.restore(state, notifier);
                notifier.add(idea_id).error("Failed to delete idea");
            });
            return Err(error.into());
        }

        info!(%idea_id, "Idea deleted");
        self.toast(|notifier| {
            notifier.success("Idea deleted.");
        });
        Ok(())
    }
}
