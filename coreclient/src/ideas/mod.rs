// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ideas of the idea bank with their tasks and comments.

use chrono::{DateTime, Utc};
use hbapiclient::rows::{
    CommentRow, IdeaChangesRow, IdeaRow, IdeaSectionsRow, NewIdeaRow, TaskRow,
};
use hbcommon::{
    identifiers::{CommentId, HackathonId, IdeaId, TaskId, UserId},
    status::IdeaStatus,
};

use crate::members::MemberDirectory;

pub(crate) const MIN_LEVEL: u8 = 1;
pub(crate) const MAX_LEVEL: u8 = 10;
pub(crate) const MAX_PROGRESS: u8 = 100;

const DEFAULT_DESCRIPTION: &str = "New idea";

fn clamp_column(value: i32, min: u8, max: u8) -> u8 {
    // In range of `u8` after clamping.
    value.clamp(min.into(), max.into()) as u8
}

/// The pitch of an idea, split into free-text sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdeaSections {
    pub problem: String,
    pub solution: String,
    pub target_users: String,
    pub value_prop: String,
}

impl From<IdeaSectionsRow> for IdeaSections {
    fn from(row: IdeaSectionsRow) -> Self {
        Self {
            problem: row.problem,
            solution: row.solution,
            target_users: row.target_users,
            value_prop: row.value_prop,
        }
    }
}

impl From<IdeaSections> for IdeaSectionsRow {
    fn from(sections: IdeaSections) -> Self {
        Self {
            problem: sections.problem,
            solution: sections.solution,
            target_users: sections.target_users,
            value_prop: sections.value_prop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub(crate) fn from_row(row: TaskRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id,
            text: row.text,
            completed: row.completed.unwrap_or(false),
            created_at: row.created_at.unwrap_or(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    /// Name of the author at the time the comments were loaded.
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn from_row(row: CommentRow, members: &MemberDirectory, now: DateTime<Utc>) -> Self {
        let user_name = members
            .get(&row.user_id)
            .map(|member| member.name.clone())
            .unwrap_or_else(|| "Unknown".to_owned());
        Self {
            id: row.id,
            user_id: row.user_id,
            user_name,
            text: row.text,
            created_at: row.created_at.unwrap_or(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    /// Maturity of the idea from 1 to 10.
    pub level: u8,
    /// Completion in percent.
    pub progress: u8,
    pub hackathon_id: Option<HackathonId>,
    pub sections: IdeaSections,
    pub updated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub comments: Vec<Comment>,
}

impl Idea {
    /// Maps a row of the `ideas` table. Tasks and comments are loaded separately.
    pub(crate) fn from_row(row: IdeaRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
            status: row
                .status
                .and_then(|status| status.parse().ok())
                .unwrap_or_default(),
            level: row
                .level
                .map_or(MIN_LEVEL, |level| clamp_column(level, MIN_LEVEL, MAX_LEVEL)),
            progress: row
                .progress
                .map_or(0, |progress| clamp_column(progress, 0, MAX_PROGRESS)),
            hackathon_id: row.hackathon_id,
            sections: row.sections.map(From::from).unwrap_or_default(),
            updated_at: row.updated_at.or(row.created_at).unwrap_or(now),
            tasks: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Replaces the stored columns with the ones of `row`, keeping tasks and comments.
    pub(crate) fn merge_row(&mut self, row: IdeaRow, now: DateTime<Utc>) {
        let tasks = std::mem::take(&mut self.tasks);
        let comments = std::mem::take(&mut self.comments);
        *self = Self {
            tasks,
            comments,
            ..Self::from_row(row, now)
        };
    }

    pub(crate) fn apply(&mut self, update: &IdeaUpdate, now: DateTime<Utc>) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(tags) = &update.tags {
            self.tags.clone_from(tags);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(level) = update.level {
            self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        }
        if let Some(progress) = update.progress {
            self.progress = progress.min(MAX_PROGRESS);
        }
        if let Some(hackathon_id) = update.hackathon_id {
            self.hackathon_id = hackathon_id;
        }
        if let Some(sections) = &update.sections {
            self.sections.clone_from(sections);
        }
        self.updated_at = now;
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}

/// Input for creating an idea.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub tags: Option<Vec<String>>,
    pub status: Option<IdeaStatus>,
    pub level: Option<u8>,
    pub progress: Option<u8>,
    pub sections: Option<IdeaSections>,
}

impl NewIdea {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builds the insert payload.
    ///
    /// Returns `None` if the title is blank. A blank description is replaced by a placeholder.
    pub(crate) fn into_row(self, owner_id: Option<UserId>) -> Option<NewIdeaRow> {
        let title = hbcommon::utils::non_blank(&self.title)?.to_owned();
        let description = hbcommon::utils::non_blank(&self.description)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_owned();
        Some(NewIdeaRow {
            title,
            description,
            tags: self.tags.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            level: self.level.unwrap_or(MIN_LEVEL).clamp(MIN_LEVEL, MAX_LEVEL),
            progress: self.progress.unwrap_or(0).min(MAX_PROGRESS),
            sections: self.sections.unwrap_or_default().into(),
            owner_id,
        })
    }
}

/// Partial update of an idea. Only the present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<IdeaStatus>,
    pub level: Option<u8>,
    pub progress: Option<u8>,
    /// `Some(None)` removes the idea from its hackathon.
    pub hackathon_id: Option<Option<HackathonId>>,
    pub sections: Option<IdeaSections>,
}

impl IdeaUpdate {
    pub(crate) fn to_changes(&self, updated_at: DateTime<Utc>) -> IdeaChangesRow {
        IdeaChangesRow {
            title: self.title.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            status: self.status,
            level: self.level.map(|level| level.clamp(MIN_LEVEL, MAX_LEVEL)),
            progress: self.progress.map(|progress| progress.min(MAX_PROGRESS)),
            hackathon_id: self.hackathon_id,
            sections: self.sections.clone().map(From::from),
            updated_at: Some(updated_at),
        }
    }
}
