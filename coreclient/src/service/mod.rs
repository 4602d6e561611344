// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The remote calls made by the store.
//!
//! [`DataService`] is implemented by the HTTP [`ApiClient`](hbapiclient::ApiClient) and by the
//! in-memory backend used in tests.

use std::fmt;

use hbapiclient::{
    auth_api::{AuthRequestError, AuthUser, SignUpResponse, Web3Credentials},
    rest_api::RestRequestError,
    rows::{
        ActivityRow, CommentRow, HackathonChangesRow, HackathonRow, IdeaChangesRow, IdeaRow,
        NewCommentRow, NewHackathonRow, NewIdeaRow, NewProfileRow, NewTaskRow, PrdChangesRow,
        PrdRow, ProfileRow, TaskChangesRow, TaskRow, TechStackChangesRow, TechStackRow,
    },
};
use hbcommon::identifiers::{HackathonId, IdeaId, TaskId, UserId};
use secrecy::SecretString;

mod api;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataServiceErrorKind {
    /// Missing or rejected credentials.
    Auth,
    /// The addressed row does not exist.
    NotFound,
    /// The service refused the request, e.g. because of a constraint or policy.
    Rejected,
    /// The service could not be reached or responded with garbage.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DataServiceError {
    pub kind: DataServiceErrorKind,
    pub message: String,
}

impl DataServiceError {
    pub fn new(kind: DataServiceErrorKind, message: impl fmt::Display) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn auth(message: impl fmt::Display) -> Self {
        Self::new(DataServiceErrorKind::Auth, message)
    }

    pub fn not_found(message: impl fmt::Display) -> Self {
        Self::new(DataServiceErrorKind::NotFound, message)
    }

    pub fn rejected(message: impl fmt::Display) -> Self {
        Self::new(DataServiceErrorKind::Rejected, message)
    }

    pub fn transport(message: impl fmt::Display) -> Self {
        Self::new(DataServiceErrorKind::Transport, message)
    }
}

impl From<AuthRequestError> for DataServiceError {
    fn from(error: AuthRequestError) -> Self {
        match &error {
            AuthRequestError::NotSignedIn => Self::auth(error),
            AuthRequestError::Rejected { status, .. } if is_auth_failure(status.as_u16()) => {
                Self::auth(error)
            }
            AuthRequestError::Rejected { .. } => Self::rejected(error),
            AuthRequestError::Reqwest(_) => Self::transport(error),
        }
    }
}

impl From<RestRequestError> for DataServiceError {
    fn from(error: RestRequestError) -> Self {
        match &error {
            RestRequestError::Status { status, .. } if is_auth_failure(status.as_u16()) => {
                Self::auth(error)
            }
            RestRequestError::Status { status, .. } if status.as_u16() == 404 => {
                Self::not_found(error)
            }
            RestRequestError::Status { .. } => Self::rejected(error),
            RestRequestError::EmptyResponse(_) => Self::not_found(error),
            RestRequestError::Reqwest(_) => Self::transport(error),
        }
    }
}

fn is_auth_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

pub type DataServiceResult<T> = Result<T, DataServiceError>;

/// Every remote call the store makes.
///
/// Collection fetches return all rows of a table. Writes return the row as stored by the
/// service where the store needs it.
pub trait DataService: Send + Sync + 'static {
    // Auth

    /// Whether a session is established.
    fn has_session(&self) -> bool;

    /// The user of the current session.
    fn auth_user(&self) -> impl Future<Output = DataServiceResult<Option<AuthUser>>> + Send;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = DataServiceResult<AuthUser>> + Send;

    fn sign_in_with_web3(
        &self,
        credentials: &Web3Credentials,
    ) -> impl Future<Output = DataServiceResult<AuthUser>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = DataServiceResult<SignUpResponse>> + Send;

    fn sign_out(&self) -> impl Future<Output = DataServiceResult<()>> + Send;

    // Profiles

    fn profile(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = DataServiceResult<Option<ProfileRow>>> + Send;

    fn insert_profile(
        &self,
        profile: &NewProfileRow,
    ) -> impl Future<Output = DataServiceResult<ProfileRow>> + Send;

    fn profiles(&self) -> impl Future<Output = DataServiceResult<Vec<ProfileRow>>> + Send;

    // Collections

    /// Newest first.
    fn ideas(&self) -> impl Future<Output = DataServiceResult<Vec<IdeaRow>>> + Send;

    /// Oldest first.
    fn tasks(&self) -> impl Future<Output = DataServiceResult<Vec<TaskRow>>> + Send;

    /// Oldest first.
    fn comments(&self) -> impl Future<Output = DataServiceResult<Vec<CommentRow>>> + Send;

    fn prds(&self) -> impl Future<Output = DataServiceResult<Vec<PrdRow>>> + Send;

    fn tech_stacks(&self) -> impl Future<Output = DataServiceResult<Vec<TechStackRow>>> + Send;

    fn hackathons(&self) -> impl Future<Output = DataServiceResult<Vec<HackathonRow>>> + Send;

    /// Newest first.
    fn activities(&self) -> impl Future<Output = DataServiceResult<Vec<ActivityRow>>> + Send;

    // Ideas

    fn insert_idea(
        &self,
        idea: &NewIdeaRow,
    ) -> impl Future<Output = DataServiceResult<IdeaRow>> + Send;

    fn update_idea(
        &self,
        idea_id: IdeaId,
        changes: &IdeaChangesRow,
    ) -> impl Future<Output = DataServiceResult<IdeaRow>> + Send;

    fn delete_idea(&self, idea_id: IdeaId) -> impl Future<Output = DataServiceResult<()>> + Send;

    /// Clears `hackathon_id` on every idea linked to the hackathon.
    fn unlink_hackathon(
        &self,
        hackathon_id: HackathonId,
    ) -> impl Future<Output = DataServiceResult<()>> + Send;

    // Tasks and comments

    fn insert_task(
        &self,
        task: &NewTaskRow,
    ) -> impl Future<Output = DataServiceResult<TaskRow>> + Send;

    fn update_task(
        &self,
        task_id: TaskId,
        changes: &TaskChangesRow,
    ) -> impl Future<Output = DataServiceResult<()>> + Send;

    fn delete_task(&self, task_id: TaskId) -> impl Future<Output = DataServiceResult<()>> + Send;

    fn insert_comment(
        &self,
        comment: &NewCommentRow,
    ) -> impl Future<Output = DataServiceResult<CommentRow>> + Send;

    // Planning

    /// Inserts the PRD or merges the present fields into the idea's existing PRD.
    fn upsert_prd(
        &self,
        changes: &PrdChangesRow,
    ) -> impl Future<Output = DataServiceResult<PrdRow>> + Send;

    /// Inserts the stack or merges the present fields into the idea's existing stack.
    fn upsert_tech_stack(
        &self,
        changes: &TechStackChangesRow,
    ) -> impl Future<Output = DataServiceResult<TechStackRow>> + Send;

    // Hackathons

    fn insert_hackathon(
        &self,
        hackathon: &NewHackathonRow,
    ) -> impl Future<Output = DataServiceResult<HackathonRow>> + Send;

    fn update_hackathon(
        &self,
        hackathon_id: HackathonId,
        changes: &HackathonChangesRow,
    ) -> impl Future<Output = DataServiceResult<HackathonRow>> + Send;

    fn delete_hackathon(
        &self,
        hackathon_id: HackathonId,
    ) -> impl Future<Output = DataServiceResult<()>> + Send;
}
