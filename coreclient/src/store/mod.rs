// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory state of the client and its change notifications.

use std::collections::HashMap;

use hbcommon::identifiers::{HackathonId, IdeaId};

use crate::{
    activities::Activity,
    hackathons::{Hackathon, build_hackathon_links},
    ideas::Idea,
    members::Member,
    prds::Prd,
    stacks::TechStack,
};

pub(crate) use notification::{StoreNotificationsSender, StoreNotifier, store_notifications_channel};
pub use notification::{StoreEntityId, StoreNotification, StoreOperation, Toast, ToastKind};

mod notification;

/// Everything the client knows about the idea bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Profile of the signed-in user.
    pub user: Option<Member>,
    /// Set once the session check at startup has finished.
    pub auth_ready: bool,
    pub members: Vec<Member>,
    /// Newest first.
    pub ideas: Vec<Idea>,
    pub hackathons: Vec<Hackathon>,
    pub prds: HashMap<IdeaId, Prd>,
    pub stacks: HashMap<IdeaId, TechStack>,
    /// Newest first.
    pub activities: Vec<Activity>,
    /// Set while the collections are loaded.
    pub loading: bool,
}

impl AppState {
    pub fn idea(&self, idea_id: IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| idea.id == idea_id)
    }

    pub(crate) fn idea_mut(&mut self, idea_id: IdeaId) -> Option<&mut Idea> {
        self.ideas.iter_mut().find(|idea| idea.id == idea_id)
    }

    pub fn hackathon(&self, hackathon_id: HackathonId) -> Option<&Hackathon> {
        self.hackathons
            .iter()
            .find(|hackathon| hackathon.id == hackathon_id)
    }

    pub(crate) fn hackathon_mut(&mut self, hackathon_id: HackathonId) -> Option<&mut Hackathon> {
        self.hackathons
            .iter_mut()
            .find(|hackathon| hackathon.id == hackathon_id)
    }

    /// Recomputes the linked ideas of all hackathons and records the ones that changed.
    pub(crate) fn rebuild_links(&mut self, notifier: &mut StoreNotifier) {
        let previous = std::mem::take(&mut self.hackathons);
        let previous_links: HashMap<HackathonId, Vec<IdeaId>> = previous
            .iter()
            .map(|hackathon| (hackathon.id, hackathon.linked_idea_ids.clone()))
            .collect();
        self.hackathons = build_hackathon_links(&self.ideas, previous);
        for hackathon in &self.hackathons {
            if previous_links.get(&hackathon.id) != Some(&hackathon.linked_idea_ids) {
                notifier.update(hackathon.id);
            }
        }
    }

    /// Drops all data of the signed-in user.
    pub(crate) fn clear(&mut self) {
        *self = Self {
            auth_ready: true,
            ..Self::default()
        };
    }

    pub(crate) fn snapshot_ideas(&self) -> IdeasSnapshot {
        IdeasSnapshot {
            ideas: self.ideas.clone(),
            hackathons: self.hackathons.clone(),
        }
    }
}

/// Ideas and hackathons before an optimistic change.
///
/// Restored as a whole when the change is rejected by the service.
#[derive(Debug)]
#[must_use]
pub(crate) struct IdeasSnapshot {
    ideas: Vec<Idea>,
    hackathons: Vec<Hackathon>,
}

impl IdeasSnapshot {
    /// Puts the snapshot back and records the hackathons whose links change.
    pub(crate) fn restore(self, state: &mut AppState, notifier: &mut StoreNotifier) {
        for hackathon in &self.hackathons {
            if state.hackathon(hackathon.id).map(|current| &current.linked_idea_ids)
                != Some(&hackathon.linked_idea_ids)
            {
                notifier.update(hackathon.id);
            }
        }
        state.ideas = self.ideas;
        state.hackathons = self.hackathons;
    }
}
