// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use chrono::Utc;
use hbapiclient::{
    auth_api::{AuthUser, SignUpResponse, UserMetadata, Web3Credentials},
    rows::{
        ActivityRow, CommentRow, HackathonChangesRow, HackathonRow, IdeaChangesRow, IdeaRow,
        NewCommentRow, NewHackathonRow, NewIdeaRow, NewProfileRow, NewTaskRow, PrdChangesRow,
        PrdRow, ProfileRow, TaskChangesRow, TaskRow, TechStackChangesRow, TechStackRow, tables,
    },
};
use hbcommon::identifiers::{ActivityId, CommentId, HackathonId, IdeaId, TaskId, UserId};
use hbcoreclient::{DataService, DataServiceError, DataServiceResult};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::control::BackendControl;

/// How the backend answers sign up requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignUpMode {
    /// The account is confirmed and signed in right away.
    #[default]
    AutoConfirm,
    /// The account is created, but the user has to confirm the email before signing in.
    RequireConfirmation,
    /// The service answers without a user.
    NoUser,
}

#[derive(Debug)]
struct Account {
    user: AuthUser,
    password: Option<String>,
    /// Signature used to sign in with a wallet.
    web3_signature: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    session: Option<UserId>,
    sign_up_mode: SignUpMode,
    profiles: Vec<ProfileRow>,
    ideas: Vec<IdeaRow>,
    tasks: Vec<TaskRow>,
    comments: Vec<CommentRow>,
    prds: Vec<PrdRow>,
    stacks: Vec<TechStackRow>,
    hackathons: Vec<HackathonRow>,
    activities: Vec<ActivityRow>,
    /// Writes in the order they were applied, e.g. `update ideas`.
    log: Vec<String>,
}

impl Tables {
    fn account(&self, user_id: UserId) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.user.id == user_id)
    }

    fn idea_mut(&mut self, idea_id: IdeaId) -> DataServiceResult<&mut IdeaRow> {
        self.ideas
            .iter_mut()
            .find(|idea| idea.id == idea_id)
            .ok_or_else(|| DataServiceError::not_found(format!("no idea {idea_id}")))
    }

    fn require_idea(&self, idea_id: IdeaId) -> DataServiceResult<()> {
        if self.ideas.iter().any(|idea| idea.id == idea_id) {
            Ok(())
        } else {
            Err(DataServiceError::rejected(format!(
                "insert violates foreign key constraint: no idea {idea_id}"
            )))
        }
    }

    fn profile_name(&self, user_id: Option<UserId>) -> Option<String> {
        let user_id = user_id?;
        self.profiles
            .iter()
            .find(|profile| profile.id == user_id)
            .map(|profile| profile.name.clone())
    }
}

/// A [`DataService`] keeping all tables in memory.
///
/// Rows are returned in the order the hosted service would return them. Creating an idea
/// appends an entry to the activity feed, like the trigger of the hosted database does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<Mutex<Tables>>,
    control: BackendControl,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&self) -> &BackendControl {
        &self.control
    }

    pub fn set_sign_up_mode(&self, mode: SignUpMode) {
        self.tables.lock().sign_up_mode = mode;
    }

    /// Registers an account with email and password.
    ///
    /// `name` ends up in the account metadata, from which a missing profile is created.
    pub fn add_account(&self, email: &str, password: &str, name: Option<&str>) -> UserId {
        let user = AuthUser {
            id: UserId::random(),
            email: Some(email.to_owned()),
            user_metadata: UserMetadata {
                name: name.map(ToOwned::to_owned),
                avatar_url: None,
            },
        };
        let user_id = user.id;
        self.tables.lock().accounts.push(Account {
            user,
            password: Some(password.to_owned()),
            web3_signature: None,
        });
        user_id
    }

    /// Establishes a session for the account as if restored from disk.
    pub fn restore_session(&self, user_id: UserId) {
        self.tables.lock().session = Some(user_id);
    }

    pub fn session(&self) -> Option<UserId> {
        self.tables.lock().session
    }

    pub fn seed_profile(&self, user_id: UserId, name: &str, role: Option<&str>) {
        self.tables.lock().profiles.push(ProfileRow {
            id: user_id,
            name: name.to_owned(),
            role: role.map(ToOwned::to_owned),
            avatar_url: None,
        });
    }

    pub fn seed_idea(&self, title: &str, hackathon_id: Option<HackathonId>) -> IdeaId {
        let now = Utc::now();
        let row = IdeaRow {
            id: IdeaId::random(),
            title: title.to_owned(),
            description: Some(format!("About {title}")),
            tags: Some(Vec::new()),
            status: Some("Draft".to_owned()),
            level: Some(1),
            progress: Some(0),
            hackathon_id,
            sections: None,
            owner_id: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let idea_id = row.id;
        self.tables.lock().ideas.push(row);
        idea_id
    }

    pub fn seed_task(&self, idea_id: IdeaId, text: &str, completed: bool) -> TaskId {
        let row = TaskRow {
            id: TaskId::random(),
            idea_id: Some(idea_id),
            text: text.to_owned(),
            completed: Some(completed),
            created_at: Some(Utc::now()),
        };
        let task_id = row.id;
        self.tables.lock().tasks.push(row);
        task_id
    }

    pub fn seed_hackathon(&self, name: &str) -> HackathonId {
        let row = HackathonRow {
            id: HackathonId::random(),
            name: name.to_owned(),
            deadline: Utc::now(),
            theme: None,
            prizes: None,
            status: Some("Planned".to_owned()),
        };
        let hackathon_id = row.id;
        self.tables.lock().hackathons.push(row);
        hackathon_id
    }

    pub fn seed_activity(&self, user_name: Option<&str>, action: &str, target: &str) {
        self.tables.lock().activities.push(ActivityRow {
            id: ActivityId::random(),
            user_id: None,
            user_name: user_name.map(ToOwned::to_owned),
            action: action.to_owned(),
            target: target.to_owned(),
            timestamp: Some(Utc::now()),
        });
    }

    pub fn idea_row(&self, idea_id: IdeaId) -> Option<IdeaRow> {
        let tables = self.tables.lock();
        tables.ideas.iter().find(|idea| idea.id == idea_id).cloned()
    }

    pub fn idea_rows(&self) -> Vec<IdeaRow> {
        self.tables.lock().ideas.clone()
    }

    pub fn task_rows(&self) -> Vec<TaskRow> {
        self.tables.lock().tasks.clone()
    }

    pub fn comment_rows(&self) -> Vec<CommentRow> {
        self.tables.lock().comments.clone()
    }

    pub fn profile_rows(&self) -> Vec<ProfileRow> {
        self.tables.lock().profiles.clone()
    }

    pub fn prd_row(&self, idea_id: IdeaId) -> Option<PrdRow> {
        let tables = self.tables.lock();
        tables.prds.iter().find(|prd| prd.idea_id == idea_id).cloned()
    }

    pub fn stack_row(&self, idea_id: IdeaId) -> Option<TechStackRow> {
        let tables = self.tables.lock();
        tables
            .stacks
            .iter()
            .find(|stack| stack.idea_id == idea_id)
            .cloned()
    }

    pub fn hackathon_row(&self, hackathon_id: HackathonId) -> Option<HackathonRow> {
        let tables = self.tables.lock();
        tables
            .hackathons
            .iter()
            .find(|hackathon| hackathon.id == hackathon_id)
            .cloned()
    }

    /// The writes applied so far, e.g. `["insert ideas", "delete tasks"]`.
    pub fn write_log(&self) -> Vec<String> {
        self.tables.lock().log.clone()
    }

    /// Waits until writes to `table` are allowed, then applies `f` and logs the write.
    async fn write<T>(
        &self,
        operation: &str,
        table: &'static str,
        f: impl FnOnce(&mut Tables) -> DataServiceResult<T>,
    ) -> DataServiceResult<T> {
        self.control.check_write(table).await?;
        let mut tables = self.tables.lock();
        let value = f(&mut tables)?;
        debug!(operation, table, "Applied write");
        tables.log.push(format!("{operation} {table}"));
        Ok(value)
    }

    /// Waits until reads from `table` are allowed, then applies `f`.
    async fn read<T>(
        &self,
        table: &'static str,
        f: impl FnOnce(&Tables) -> T,
    ) -> DataServiceResult<T> {
        self.control.check_read(table).await?;
        Ok(f(&self.tables.lock()))
    }
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

impl DataService for InMemoryBackend {
    fn has_session(&self) -> bool {
        self.tables.lock().session.is_some()
    }

    async fn auth_user(&self) -> DataServiceResult<Option<AuthUser>> {
        self.control.check_auth()?;
        let tables = self.tables.lock();
        Ok(tables
            .session
            .and_then(|user_id| tables.account(user_id))
            .map(|account| account.user.clone()))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> DataServiceResult<AuthUser> {
        self.control.check_auth()?;
        let mut tables = self.tables.lock();
        let user = tables
            .accounts
            .iter()
            .find(|account| {
                account.user.email.as_deref() == Some(email)
                    && account.password.as_deref() == Some(password.expose_secret())
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| DataServiceError::auth("Invalid login credentials"))?;
        tables.session = Some(user.id);
        Ok(user)
    }

    async fn sign_in_with_web3(
        &self,
        credentials: &Web3Credentials,
    ) -> DataServiceResult<AuthUser> {
        self.control.check_auth()?;
        let mut tables = self.tables.lock();
        let existing = tables
            .accounts
            .iter()
            .find(|account| account.web3_signature.as_deref() == Some(&credentials.signature))
            .map(|account| account.user.clone());
        let user = match existing {
            Some(user) => user,
            None => {
                let user = AuthUser {
                    id: UserId::random(),
                    email: None,
                    user_metadata: UserMetadata::default(),
                };
                tables.accounts.push(Account {
                    user: user.clone(),
                    password: None,
                    web3_signature: Some(credentials.signature.clone()),
                });
                user
            }
        };
        tables.session = Some(user.id);
        Ok(user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> DataServiceResult<SignUpResponse> {
        self.control.check_auth()?;
        let mut tables = self.tables.lock();
        if tables
            .accounts
            .iter()
            .any(|account| account.user.email.as_deref() == Some(email))
        {
            return Err(DataServiceError::rejected("User already registered"));
        }
        let mode = tables.sign_up_mode;
        if mode == SignUpMode::NoUser {
            return Ok(SignUpResponse {
                user: None,
                signed_in: false,
            });
        }
        let user = AuthUser {
            id: UserId::random(),
            email: Some(email.to_owned()),
            user_metadata: UserMetadata::default(),
        };
        tables.accounts.push(Account {
            user: user.clone(),
            password: Some(password.expose_secret().to_owned()),
            web3_signature: None,
        });
        let signed_in = mode == SignUpMode::AutoConfirm;
        if signed_in {
            tables.session = Some(user.id);
        }
        Ok(SignUpResponse {
            user: Some(user),
            signed_in,
        })
    }

    async fn sign_out(&self) -> DataServiceResult<()> {
        self.tables.lock().session = None;
        self.control.check_auth()
    }

    async fn profile(&self, user_id: UserId) -> DataServiceResult<Option<ProfileRow>> {
        self.read(tables::PROFILES, |tables| {
            tables
                .profiles
                .iter()
                .find(|profile| profile.id == user_id)
                .cloned()
        })
        .await
    }

    async fn insert_profile(&self, profile: &NewProfileRow) -> DataServiceResult<ProfileRow> {
        self.write("insert", tables::PROFILES, |tables| {
            if tables.profiles.iter().any(|row| row.id == profile.id) {
                return Err(DataServiceError::rejected(
                    "duplicate key value violates unique constraint \"profiles_pkey\"",
                ));
            }
            let row = ProfileRow {
                id: profile.id,
                name: profile.name.clone(),
                role: Some(profile.role.to_string()),
                avatar_url: profile.avatar_url.clone(),
            };
            tables.profiles.push(row.clone());
            Ok(row)
        })
        .await
    }

    async fn profiles(&self) -> DataServiceResult<Vec<ProfileRow>> {
        self.read(tables::PROFILES, |tables| tables.profiles.clone()).await
    }

    async fn ideas(&self) -> DataServiceResult<Vec<IdeaRow>> {
        self.read(tables::IDEAS, |tables| newest_first(&tables.ideas)).await
    }

    async fn tasks(&self) -> DataServiceResult<Vec<TaskRow>> {
        self.read(tables::TASKS, |tables| tables.tasks.clone()).await
    }

    async fn comments(&self) -> DataServiceResult<Vec<CommentRow>> {
        self.read(tables::COMMENTS, |tables| tables.comments.clone()).await
    }

    async fn prds(&self) -> DataServiceResult<Vec<PrdRow>> {
        self.read(tables::PRDS, |tables| tables.prds.clone()).await
    }

    async fn tech_stacks(&self) -> DataServiceResult<Vec<TechStackRow>> {
        self.read(tables::TECH_STACKS, |tables| tables.stacks.clone()).await
    }

    async fn hackathons(&self) -> DataServiceResult<Vec<HackathonRow>> {
        self.read(tables::HACKATHONS, |tables| tables.hackathons.clone()).await
    }

    async fn activities(&self) -> DataServiceResult<Vec<ActivityRow>> {
        self.read(tables::ACTIVITIES, |tables| newest_first(&tables.activities)).await
    }

    async fn insert_idea(&self, idea: &NewIdeaRow) -> DataServiceResult<IdeaRow> {
        self.write("insert", tables::IDEAS, |tables| {
            let now = Utc::now();
            let row = IdeaRow {
                id: IdeaId::random(),
                title: idea.title.clone(),
                description: Some(idea.description.clone()),
                tags: Some(idea.tags.clone()),
                status: Some(idea.status.to_string()),
                level: Some(idea.level.into()),
                progress: Some(idea.progress.into()),
                hackathon_id: None,
                sections: Some(idea.sections.clone()),
                owner_id: idea.owner_id,
                created_at: Some(now),
                updated_at: None,
            };
            tables.ideas.push(row.clone());
            let user_name = tables.profile_name(idea.owner_id);
            tables.activities.push(ActivityRow {
                id: ActivityId::random(),
                user_id: idea.owner_id,
                user_name,
                action: "created".to_owned(),
                target: idea.title.clone(),
                timestamp: Some(now),
            });
            Ok(row)
        })
        .await
    }

    async fn update_idea(
        &self,
        idea_id: IdeaId,
        changes: &IdeaChangesRow,
    ) -> DataServiceResult<IdeaRow> {
        self.write("update", tables::IDEAS, |tables| {
            let row = tables.idea_mut(idea_id)?;
            if let Some(title) = &changes.title {
                row.title.clone_from(title);
            }
            if let Some(description) = &changes.description {
                row.description = Some(description.clone());
            }
            if let Some(tags) = &changes.tags {
                row.tags = Some(tags.clone());
            }
            if let Some(status) = changes.status {
                row.status = Some(status.to_string());
            }
            if let Some(level) = changes.level {
                row.level = Some(level.into());
            }
            if let Some(progress) = changes.progress {
                row.progress = Some(progress.into());
            }
            if let Some(hackathon_id) = changes.hackathon_id {
                row.hackathon_id = hackathon_id;
            }
            if let Some(sections) = &changes.sections {
                row.sections = Some(sections.clone());
            }
            if let Some(updated_at) = changes.updated_at {
                row.updated_at = Some(updated_at);
            }
            Ok(row.clone())
        })
        .await
    }

    async fn delete_idea(&self, idea_id: IdeaId) -> DataServiceResult<()> {
        self.write("delete", tables::IDEAS, |tables| {
            tables.ideas.retain(|idea| idea.id != idea_id);
            tables.tasks.retain(|task| task.idea_id != Some(idea_id));
            tables
                .comments
                .retain(|comment| comment.idea_id != Some(idea_id));
            tables.prds.retain(|prd| prd.idea_id != idea_id);
            tables.stacks.retain(|stack| stack.idea_id != idea_id);
            Ok(())
        })
        .await
    }

    async fn unlink_hackathon(&self, hackathon_id: HackathonId) -> DataServiceResult<()> {
        self.write("unlink", tables::IDEAS, |tables| {
            for idea in tables
                .ideas
                .iter_mut()
                .filter(|idea| idea.hackathon_id == Some(hackathon_id))
            {
                idea.hackathon_id = None;
            }
            Ok(())
        })
        .await
    }

    async fn insert_task(&self, task: &NewTaskRow) -> DataServiceResult<TaskRow> {
        self.write("insert", tables::TASKS, |tables| {
            tables.require_idea(task.idea_id)?;
            let row = TaskRow {
                id: TaskId::random(),
                idea_id: Some(task.idea_id),
                text: task.text.clone(),
                completed: Some(task.completed),
                created_at: Some(Utc::now()),
            };
            tables.tasks.push(row.clone());
            Ok(row)
        })
        .await
    }

    async fn update_task(&self, task_id: TaskId, changes: &TaskChangesRow) -> DataServiceResult<()> {
        self.write("update", tables::TASKS, |tables| {
            if let Some(task) = tables.tasks.iter_mut().find(|task| task.id == task_id) {
                task.completed = Some(changes.completed);
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, task_id: TaskId) -> DataServiceResult<()> {
        self.write("delete", tables::TASKS, |tables| {
            tables.tasks.retain(|task| task.id != task_id);
            Ok(())
        })
        .await
    }

    async fn insert_comment(&self, comment: &NewCommentRow) -> DataServiceResult<CommentRow> {
        self.write("insert", tables::COMMENTS, |tables| {
            tables.require_idea(comment.idea_id)?;
            let row = CommentRow {
                id: CommentId::random(),
                idea_id: Some(comment.idea_id),
                user_id: comment.user_id,
                text: comment.text.clone(),
                created_at: Some(Utc::now()),
            };
            tables.comments.push(row.clone());
            Ok(row)
        })
        .await
    }

    async fn upsert_prd(&self, changes: &PrdChangesRow) -> DataServiceResult<PrdRow> {
        self.write("upsert", tables::PRDS, |tables| {
            let index = match tables
                .prds
                .iter()
                .position(|prd| prd.idea_id == changes.idea_id)
            {
                Some(index) => index,
                None => {
                    tables.prds.push(PrdRow {
                        idea_id: changes.idea_id,
                        overview: None,
                        goals: None,
                        non_goals: None,
                        user_stories: None,
                        mvp_scope: None,
                        success_metrics: None,
                        risks: None,
                        open_questions: None,
                    });
                    tables.prds.len() - 1
                }
            };
            let row = &mut tables.prds[index];
            merge(&mut row.overview, &changes.overview);
            merge(&mut row.goals, &changes.goals);
            merge(&mut row.non_goals, &changes.non_goals);
            merge(&mut row.user_stories, &changes.user_stories);
            merge(&mut row.mvp_scope, &changes.mvp_scope);
            merge(&mut row.success_metrics, &changes.success_metrics);
            merge(&mut row.risks, &changes.risks);
            merge(&mut row.open_questions, &changes.open_questions);
            Ok(row.clone())
        })
        .await
    }

    async fn upsert_tech_stack(
        &self,
        changes: &TechStackChangesRow,
    ) -> DataServiceResult<TechStackRow> {
        self.write("upsert", tables::TECH_STACKS, |tables| {
            let index = match tables
                .stacks
                .iter()
                .position(|stack| stack.idea_id == changes.idea_id)
            {
                Some(index) => index,
                None => {
                    tables.stacks.push(TechStackRow {
                        idea_id: changes.idea_id,
                        frontend: None,
                        backend: None,
                        infra: None,
                        apis: None,
                        notes: None,
                    });
                    tables.stacks.len() - 1
                }
            };
            let row = &mut tables.stacks[index];
            merge(&mut row.frontend, &changes.frontend);
            merge(&mut row.backend, &changes.backend);
            merge(&mut row.infra, &changes.infra);
            merge(&mut row.apis, &changes.apis);
            merge(&mut row.notes, &changes.notes);
            Ok(row.clone())
        })
        .await
    }

    async fn insert_hackathon(&self, hackathon: &NewHackathonRow) -> DataServiceResult<HackathonRow> {
        self.write("insert", tables::HACKATHONS, |tables| {
            let row = HackathonRow {
                id: HackathonId::random(),
                name: hackathon.name.clone(),
                deadline: hackathon.deadline,
                theme: Some(hackathon.theme.clone()),
                prizes: Some(hackathon.prizes.clone()),
                status: Some(hackathon.status.to_string()),
            };
            tables.hackathons.push(row.clone());
            Ok(row)
        })
        .await
    }

    async fn update_hackathon(
        &self,
        hackathon_id: HackathonId,
        changes: &HackathonChangesRow,
    ) -> DataServiceResult<HackathonRow> {
        self.write("update", tables::HACKATHONS, |tables| {
            let row = tables
                .hackathons
                .iter_mut()
                .find(|hackathon| hackathon.id == hackathon_id)
                .ok_or_else(|| DataServiceError::not_found(format!("no hackathon {hackathon_id}")))?;
            if let Some(name) = &changes.name {
                row.name.clone_from(name);
            }
            if let Some(deadline) = changes.deadline {
                row.deadline = deadline;
            }
            merge(&mut row.theme, &changes.theme);
            merge(&mut row.prizes, &changes.prizes);
            if let Some(status) = changes.status {
                row.status = Some(status.to_string());
            }
            Ok(row.clone())
        })
        .await
    }

    async fn delete_hackathon(&self, hackathon_id: HackathonId) -> DataServiceResult<()> {
        self.write("delete", tables::HACKATHONS, |tables| {
            tables
                .hackathons
                .retain(|hackathon| hackathon.id != hackathon_id);
            Ok(())
        })
        .await
    }
}

fn merge<T: Clone>(column: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *column = Some(value.clone());
    }
}

#[cfg(test)]
mod test {
    use hbcommon::status::{IdeaStatus, MemberRole};

    use super::*;

    fn new_idea(title: &str) -> NewIdeaRow {
        NewIdeaRow {
            title: title.to_owned(),
            description: "New idea".to_owned(),
            tags: Vec::new(),
            status: IdeaStatus::Draft,
            level: 1,
            progress: 0,
            sections: Default::default(),
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn ideas_are_returned_newest_first() {
        let backend = InMemoryBackend::new();
        backend.insert_idea(&new_idea("first")).await.unwrap();
        backend.insert_idea(&new_idea("second")).await.unwrap();

        let titles: Vec<_> = backend
            .ideas()
            .await
            .unwrap()
            .into_iter()
            .map(|idea| idea.title)
            .collect();
        assert_eq!(titles, ["second", "first"]);
        assert_eq!(backend.activities().await.unwrap()[0].target, "second");
        assert_eq!(backend.write_log(), ["insert ideas", "insert ideas"]);
    }

    #[tokio::test]
    async fn upsert_merges_present_columns() {
        let backend = InMemoryBackend::new();
        let idea_id = backend.seed_idea("idea", None);
        let changes = |overview: Option<&str>, goals: Option<&str>| PrdChangesRow {
            idea_id,
            overview: overview.map(ToOwned::to_owned),
            goals: goals.map(ToOwned::to_owned),
            non_goals: None,
            user_stories: None,
            mvp_scope: None,
            success_metrics: None,
            risks: None,
            open_questions: None,
        };
        backend
            .upsert_prd(&changes(Some("overview"), None))
            .await
            .unwrap();
        let row = backend.upsert_prd(&changes(None, Some("goals"))).await.unwrap();
        assert_eq!(row.overview.as_deref(), Some("overview"));
        assert_eq!(row.goals.as_deref(), Some("goals"));
    }

    #[tokio::test]
    async fn sign_in_and_profile() {
        let backend = InMemoryBackend::new();
        let user_id = backend.add_account("ada@example.com", "secret", Some("Ada"));
        assert!(!backend.has_session());

        let wrong = SecretString::from("wrong".to_owned());
        assert!(
            backend
                .sign_in_with_password("ada@example.com", &wrong)
                .await
                .is_err()
        );

        let password = SecretString::from("secret".to_owned());
        let user = backend
            .sign_in_with_password("ada@example.com", &password)
            .await
            .unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(backend.auth_user().await.unwrap(), Some(user));

        backend
            .insert_profile(&NewProfileRow {
                id: user_id,
                name: "Ada".to_owned(),
                role: MemberRole::Backend,
                avatar_url: None,
            })
            .await
            .unwrap();
        let profile = backend.profile(user_id).await.unwrap().unwrap();
        assert_eq!(profile.role.as_deref(), Some("Backend"));
    }

    #[tokio::test]
    async fn tasks_require_an_idea() {
        let backend = InMemoryBackend::new();
        let task = NewTaskRow {
            idea_id: IdeaId::random(),
            text: "orphan".to_owned(),
            completed: false,
        };
        assert!(backend.insert_task(&task).await.is_err());
        assert!(backend.write_log().is_empty());
    }
}
