// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [`DataService`] backed by the hosted service.

use hbapiclient::{
    ApiClient,
    auth_api::{AuthRequestError, AuthUser, SignUpResponse, Web3Credentials},
    rest_api::{Order, Query},
    rows::{
        ActivityRow, CommentRow, HackathonChangesRow, HackathonRow, IdeaChangesRow, IdeaRow,
        NewCommentRow, NewHackathonRow, NewIdeaRow, NewProfileRow, NewTaskRow, PROFILE_COLUMNS,
        PrdChangesRow, PrdRow, ProfileRow, TaskChangesRow, TaskRow, TechStackChangesRow,
        TechStackRow, tables,
    },
};
use hbcommon::identifiers::{HackathonId, IdeaId, TaskId, UserId};
use secrecy::SecretString;
use serde_json::json;

use super::{DataService, DataServiceResult};

const CONFLICT_COLUMN: &str = "idea_id";

impl DataService for ApiClient {
    fn has_session(&self) -> bool {
        self.session_user().is_some()
    }

    async fn auth_user(&self) -> DataServiceResult<Option<AuthUser>> {
        match self.get_user().await {
            Ok(user) => Ok(Some(user)),
            Err(AuthRequestError::NotSignedIn) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> DataServiceResult<AuthUser> {
        Ok(ApiClient::sign_in_with_password(self, email, password).await?)
    }

    async fn sign_in_with_web3(
        &self,
        credentials: &Web3Credentials,
    ) -> DataServiceResult<AuthUser> {
        Ok(ApiClient::sign_in_with_web3(self, credentials).await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> DataServiceResult<SignUpResponse> {
        Ok(ApiClient::sign_up(self, email, password).await?)
    }

    async fn sign_out(&self) -> DataServiceResult<()> {
        Ok(ApiClient::sign_out(self).await?)
    }

    async fn profile(&self, user_id: UserId) -> DataServiceResult<Option<ProfileRow>> {
        let query = Query::table(tables::PROFILES)
            .select(PROFILE_COLUMNS)
            .eq("id", user_id);
        Ok(self.select_maybe_single(&query).await?)
    }

    async fn insert_profile(&self, profile: &NewProfileRow) -> DataServiceResult<ProfileRow> {
        Ok(self.insert(tables::PROFILES, profile).await?)
    }

    async fn profiles(&self) -> DataServiceResult<Vec<ProfileRow>> {
        let query = Query::table(tables::PROFILES).select(PROFILE_COLUMNS);
        Ok(self.select(&query).await?)
    }

    async fn ideas(&self) -> DataServiceResult<Vec<IdeaRow>> {
        let query = Query::table(tables::IDEAS).order("created_at", Order::Desc);
        Ok(self.select(&query).await?)
    }

    async fn tasks(&self) -> DataServiceResult<Vec<TaskRow>> {
        let query = Query::table(tables::TASKS).order("created_at", Order::Asc);
        Ok(self.select(&query).await?)
    }

    async fn comments(&self) -> DataServiceResult<Vec<CommentRow>> {
        let query = Query::table(tables::COMMENTS).order("created_at", Order::Asc);
        Ok(self.select(&query).await?)
    }

    async fn prds(&self) -> DataServiceResult<Vec<PrdRow>> {
        Ok(self.select(&Query::table(tables::PRDS)).await?)
    }

    async fn tech_stacks(&self) -> DataServiceResult<Vec<TechStackRow>> {
        Ok(self.select(&Query::table(tables::TECH_STACKS)).await?)
    }

    async fn hackathons(&self) -> DataServiceResult<Vec<HackathonRow>> {
        Ok(self.select(&Query::table(tables::HACKATHONS)).await?)
    }

    async fn activities(&self) -> DataServiceResult<Vec<ActivityRow>> {
        let query = Query::table(tables::ACTIVITIES).order("timestamp", Order::Desc);
        Ok(self.select(&query).await?)
    }

    async fn insert_idea(&self, idea: &NewIdeaRow) -> DataServiceResult<IdeaRow> {
        Ok(self.insert(tables::IDEAS, idea).await?)
    }

    async fn update_idea(
        &self,
        idea_id: IdeaId,
        changes: &IdeaChangesRow,
    ) -> DataServiceResult<IdeaRow> {
        let query = Query::table(tables::IDEAS).eq("id", idea_id);
        Ok(self.update_single(&query, changes).await?)
    }

    async fn delete_idea(&self, idea_id: IdeaId) -> DataServiceResult<()> {
        let query = Query::table(tables::IDEAS).eq("id", idea_id);
        Ok(self.delete(&query).await?)
    }

    async fn unlink_hackathon(&self, hackathon_id: HackathonId) -> DataServiceResult<()> {
        let query = Query::table(tables::IDEAS).eq("hackathon_id", hackathon_id);
        Ok(self
            .update_minimal(&query, &json!({ "hackathon_id": null }))
            .await?)
    }

    async fn insert_task(&self, task: &NewTaskRow) -> DataServiceResult<TaskRow> {
        Ok(self.insert(tables::TASKS, task).await?)
    }

    async fn update_task(&self, task_id: TaskId, changes: &TaskChangesRow) -> DataServiceResult<()> {
        let query = Query::table(tables::TASKS).eq("id", task_id);
        Ok(self.update_minimal(&query, changes).await?)
    }

    async fn delete_task(&self, task_id: TaskId) -> DataServiceResult<()> {
        let query = Query::table(tables::TASKS).eq("id", task_id);
        Ok(self.delete(&query).await?)
    }

    async fn insert_comment(&self, comment: &NewCommentRow) -> DataServiceResult<CommentRow> {
        Ok(self.insert(tables::COMMENTS, comment).await?)
    }

    async fn upsert_prd(&self, changes: &PrdChangesRow) -> DataServiceResult<PrdRow> {
        Ok(self
            .upsert(tables::PRDS, CONFLICT_COLUMN, changes)
            .await?)
    }

    async fn upsert_tech_stack(
        &self,
        changes: &TechStackChangesRow,
    ) -> DataServiceResult<TechStackRow> {
        Ok(self
            .upsert(tables::TECH_STACKS, CONFLICT_COLUMN, changes)
            .await?)
    }

    async fn insert_hackathon(&self, hackathon: &NewHackathonRow) -> DataServiceResult<HackathonRow> {
        Ok(self.insert(tables::HACKATHONS, hackathon).await?)
    }

    async fn update_hackathon(
        &self,
        hackathon_id: HackathonId,
        changes: &HackathonChangesRow,
    ) -> DataServiceResult<HackathonRow> {
        let query = Query::table(tables::HACKATHONS).eq("id", hackathon_id);
        Ok(self.update_single(&query, changes).await?)
    }

    async fn delete_hackathon(&self, hackathon_id: HackathonId) -> DataServiceResult<()> {
        let query = Query::table(tables::HACKATHONS).eq("id", hackathon_id);
        Ok(self.delete(&query).await?)
    }
}
