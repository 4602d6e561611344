// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::rows::IdeaChangesRow;
use hbcommon::identifiers::{HackathonId, IdeaId};
use tracing::{error, info};

use crate::{
    hackathons::{Hackathon, HackathonUpdate, NewHackathon},
    service::DataService,
};

use super::{CoreClient, StoreError};

const NAME_REQUIRED: &str = "Hackathon name is required";

impl<S: DataService> CoreClient<S> {
    /// Links an idea to a hackathon, replacing a previous link.
    ///
    /// The link is visible immediately and reverted if the service rejects it.
    pub async fn link_idea_to_hackathon(
        &self,
        hackathon_id: HackathonId,
        idea_id: IdeaId,
    ) -> Result<(), StoreError> {
        let snapshot = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.hackathon_id = Some(hackathon_id);
                notifier.update(idea_id);
            }
            state.rebuild_links(notifier);
            snapshot
        });

        let now = self.now();
        let changes = IdeaChangesRow {
            hackathon_id: Some(Some(hackathon_id)),
            updated_at: Some(now),
            ..Default::default()
        };
        let row = match self.service().update_idea(idea_id, &changes).await {
            Ok(row) => row,
            Err(error) => {
                error!(%idea_id, %hackathon_id, %error, "Failed to link hackathon");
                self.with_state_and_notifier(|state, notifier| {
                    snapshot.restore(state, notifier);
                    notifier.update(idea_id).error("Failed to link hackathon");
                });
                return Err(error.into());
            }
        };

        self.with_state_and_notifier(|state, notifier| {
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.merge_row(row, now);
            }
            state.rebuild_links(notifier);
            notifier.update(idea_id).success("Linked to hackathon!");
        });
        Ok(())
    }

    /// Creates a hackathon. It is added to the state once the service has stored it.
    pub async fn add_hackathon(
        &self,
        new_hackathon: NewHackathon,
    ) -> Result<HackathonId, StoreError> {
        let Some(row) = new_hackathon.into_row(self.now()) else {
            self.toast(|notifier| {
                notifier.error(NAME_REQUIRED);
            });
            return Err(StoreError::Validation(NAME_REQUIRED));
        };

        let created = match self.service().insert_hackathon(&row).await {
            Ok(created) => created,
            Err(error) => {
                error!(%error, "Failed to add hackathon");
                self.toast(|notifier| {
                    notifier.error("Failed to add hackathon");
                });
                return Err(error.into());
            }
        };

        let hackathon = Hackathon::from(created);
        let hackathon_id = hackathon.id;
        info!(%hackathon_id, "Hackathon added");
        self.with_state_and_notifier(|state, notifier| {
            state.hackathons.insert(0, hackathon);
            state.rebuild_links(notifier);
            notifier.add(hackathon_id).success("Hackathon added!");
        });
        Ok(hackathon_id)
    }

    /// Changes the fields of a hackathon present in `update`.
    ///
    /// The change is visible immediately and reverted if the service rejects it.
    pub async fn update_hackathon(
        &self,
        hackathon_id: HackathonId,
        update: HackathonUpdate,
    ) -> Result<(), StoreError> {
        let previous = self.with_state_and_notifier(|state, notifier| {
            let previous = state.hackathons.clone();
            if let Some(hackathon) = state.hackathon_mut(hackathon_id) {
                hackathon.apply(&update);
                notifier.update(hackathon_id);
            }
            previous
        });

        let changes = update.to_changes();
        let row = match self
            .service()
            .update_hackathon(hackathon_id, &changes)
            .await
        {
            Ok(row) => row,
            Err(error) => {
                error!(%hackathon_id, %error, "Failed to update hackathon");
                self.with_state_and_notifier(|state, notifier| {
                    state.hackathons = previous;
                    notifier
                        .update(hackathon_id)
                        .error("Failed to update hackathon");
                });
                return Err(error.into());
            }
        };

        self.with_state_and_notifier(|state, notifier| {
            if let Some(hackathon) = state.hackathon_mut(hackathon_id) {
                *hackathon = Hackathon::from(row);
            }
            state.rebuild_links(notifier);
            notifier.update(hackathon_id).success("Hackathon updated!");
        });
        Ok(())
    }

    /// Deletes a hackathon and unlinks its ideas.
    ///
    /// Both disappear immediately and come back if the service rejects either change.
    pub async fn delete_hackathon(&self, hackathon_id: HackathonId) -> Result<(), StoreError> {
        let (snapshot, any_linked) = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            let mut any_linked = false;
            for idea in state
                .ideas
                .iter_mut()
                .filter(|idea| idea.hackathon_id == Some(hackathon_id))
            {
                idea.hackathon_id = None;
                notifier.update(idea.id);
                any_linked = true;
            }
            state
                .hackathons
                .retain(|hackathon| hackathon.id != hackathon_id);
            state.rebuild_links(notifier);
            notifier.remove(hackathon_id);
            (snapshot, any_linked)
        });

        let service = self.service();
        let unlink = async {
            if any_linked {
                service.unlink_hackathon(hackathon_id).await
            } else {
                Ok(())
            }
        };
        let (unlinked, deleted) = tokio::join!(unlink, service.delete_hackathon(hackathon_id));

        if let Err(error) = unlinked.and(deleted) {
            error!(%hackathon_id, %error, "Failed to delete hackathon");
            self.with_state_and_notifier(|state, notifier| {
                snapshot.restore(state, notifier);
                for idea in &state.ideas {
                    if idea.hackathon_id == Some(hackathon_id) {
                        notifier.update(idea.id);
                    }
                }
                notifier
                    .add(hackathon_id)
                    .error("Failed to delete hackathon");
            });
            return Err(error.into());
        }

        info!(%hackathon_id, "Hackathon deleted");
        self.toast(|notifier| {
            notifier.success("Hackathon deleted");
        });
        Ok(())
    }
}
