// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Hackathons and the ideas linked to them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hbapiclient::rows::{HackathonChangesRow, HackathonRow, NewHackathonRow};
use hbcommon::{
    identifiers::{HackathonId, IdeaId},
    status::HackathonStatus,
    time::parse_deadline,
    utils::non_blank,
};

use crate::ideas::Idea;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hackathon {
    pub id: HackathonId,
    pub name: String,
    pub deadline: DateTime<Utc>,
    pub theme: String,
    pub prizes: Option<String>,
    pub status: HackathonStatus,
    /// Ideas whose `hackathon_id` points at this hackathon, in the order of the ideas.
    ///
    /// Derived from the ideas, see [`build_hackathon_links`].
    pub linked_idea_ids: Vec<IdeaId>,
}

impl Hackathon {
    pub(crate) fn apply(&mut self, update: &HackathonUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(deadline) = update.deadline {
            self.deadline = deadline;
        }
        if let Some(theme) = &update.theme {
            self.theme.clone_from(theme);
        }
        if let Some(prizes) = &update.prizes {
            self.prizes = Some(prizes.clone());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    pub fn is_linked(&self, idea_id: IdeaId) -> bool {
        self.linked_idea_ids.contains(&idea_id)
    }
}

impl From<HackathonRow> for Hackathon {
    fn from(row: HackathonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            deadline: row.deadline,
            theme: row.theme.unwrap_or_default(),
            prizes: row.prizes,
            status: row
                .status
                .and_then(|status| status.parse().ok())
                .unwrap_or_default(),
            linked_idea_ids: Vec::new(),
        }
    }
}

/// Recomputes the linked ideas of each hackathon from the ideas' `hackathon_id`.
///
/// Ideas pointing at unknown hackathons are ignored.
pub fn build_hackathon_links(ideas: &[Idea], hackathons: Vec<Hackathon>) -> Vec<Hackathon> {
    let mut links: HashMap<HackathonId, Vec<IdeaId>> = HashMap::new();
    for idea in ideas {
        if let Some(hackathon_id) = idea.hackathon_id {
            links.entry(hackathon_id).or_default().push(idea.id);
        }
    }
    hackathons
        .into_iter()
        .map(|hackathon| Hackathon {
            linked_idea_ids: links.remove(&hackathon.id).unwrap_or_default(),
            ..hackathon
        })
        .collect()
}

/// Input for creating a hackathon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHackathon {
    pub name: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date. Defaults to now.
    pub deadline: Option<String>,
    pub theme: Option<String>,
    pub prizes: Option<String>,
    pub status: Option<HackathonStatus>,
}

impl NewHackathon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builds the insert payload. Returns `None` if the name is blank.
    pub(crate) fn into_row(self, now: DateTime<Utc>) -> Option<NewHackathonRow> {
        let name = non_blank(&self.name)?.to_owned();
        let trimmed = |value: Option<String>| {
            value
                .map(|value| value.trim().to_owned())
                .unwrap_or_default()
        };
        Some(NewHackathonRow {
            name,
            deadline: parse_deadline(self.deadline.as_deref(), now),
            theme: trimmed(self.theme),
            prizes: trimmed(self.prizes),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Partial update of a hackathon.
///
/// The linked ideas are not part of the update; they follow the ideas' `hackathon_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HackathonUpdate {
    pub name: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub theme: Option<String>,
    pub prizes: Option<String>,
    pub status: Option<HackathonStatus>,
}

impl HackathonUpdate {
    pub(crate) fn to_changes(&self) -> HackathonChangesRow {
        HackathonChangesRow {
            name: self.name.clone(),
            deadline: self.deadline,
            theme: self.theme.clone(),
            prizes: self.prizes.clone(),
            status: self.status,
        }
    }
}
