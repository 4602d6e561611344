// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Wire representation of the tables of the data service.
//!
//! Rows read from the service keep nullable columns as `Option`s; the client maps them to domain
//! types and fills in defaults. Write payloads skip absent fields, so a partial update only
//! touches the columns it carries.

use chrono::{DateTime, Utc};
use hbcommon::{
    identifiers::{ActivityId, CommentId, HackathonId, IdeaId, TaskId, UserId},
    status::{HackathonStatus, IdeaStatus, MemberRole},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Table names.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const IDEAS: &str = "ideas";
    pub const TASKS: &str = "tasks";
    pub const COMMENTS: &str = "comments";
    pub const PRDS: &str = "prds";
    pub const TECH_STACKS: &str = "tech_stacks";
    pub const HACKATHONS: &str = "hackathons";
    pub const ACTIVITIES: &str = "activities";
}

/// Columns selected from the `profiles` table.
pub const PROFILE_COLUMNS: &str = "id, name, role, avatar_url";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfileRow {
    pub id: UserId,
    pub name: String,
    pub role: MemberRole,
    pub avatar_url: Option<String>,
}

/// The free-text sections of an idea, stored as a JSON column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaSectionsRow {
    pub problem: String,
    pub solution: String,
    pub target_users: String,
    pub value_prop: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRow {
    pub id: IdeaId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
    /// Unchecked by the backend; see `Idea::from_row`.
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub hackathon_id: Option<HackathonId>,
    #[serde(default)]
    pub sections: Option<IdeaSectionsRow>,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIdeaRow {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    pub level: u8,
    pub progress: u8,
    pub sections: IdeaSectionsRow,
    pub owner_id: Option<UserId>,
}

/// Partial update of an idea.
///
/// `hackathon_id: Some(None)` clears the link, `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdeaChangesRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IdeaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackathon_id: Option<Option<HackathonId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<IdeaSectionsRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: TaskId,
    #[serde(default)]
    pub idea_id: Option<IdeaId>,
    pub text: String,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTaskRow {
    pub idea_id: IdeaId,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskChangesRow {
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: CommentId,
    #[serde(default)]
    pub idea_id: Option<IdeaId>,
    pub user_id: UserId,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommentRow {
    pub idea_id: IdeaId,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdRow {
    pub idea_id: IdeaId,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub non_goals: Option<String>,
    #[serde(default)]
    pub user_stories: Option<Vec<String>>,
    #[serde(default)]
    pub mvp_scope: Option<Vec<String>>,
    #[serde(default)]
    pub success_metrics: Option<Vec<String>>,
    #[serde(default)]
    pub risks: Option<Vec<String>>,
    #[serde(default)]
    pub open_questions: Option<Vec<String>>,
}

/// Upsert payload of a PRD; only the present fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrdChangesRow {
    pub idea_id: IdeaId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvp_scope: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_metrics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStackRow {
    pub idea_id: IdeaId,
    #[serde(default)]
    pub frontend: Option<Vec<String>>,
    #[serde(default)]
    pub backend: Option<Vec<String>>,
    #[serde(default)]
    pub infra: Option<Vec<String>>,
    #[serde(default)]
    pub apis: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Upsert payload of a tech stack; only the present fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechStackChangesRow {
    pub idea_id: IdeaId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apis: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackathonRow {
    pub id: HackathonId,
    pub name: String,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub prizes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewHackathonRow {
    pub name: String,
    pub theme: String,
    pub prizes: String,
    pub deadline: DateTime<Utc>,
    pub status: HackathonStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HackathonChangesRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HackathonStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub id: ActivityId,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub action: String,
    pub target: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Activities written by system jobs carry an empty user id.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
