// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::rows::{NewCommentRow, NewTaskRow, TaskChangesRow};
use hbcommon::{
    identifiers::{IdeaId, TaskId},
    utils::non_blank,
};
use tracing::{debug, error};

use crate::{
    ideas::{Comment, Task},
    members::MemberDirectory,
    service::DataService,
};

use super::{CoreClient, StoreError};

impl<S: DataService> CoreClient<S> {
    /// Adds a task to an idea. Blank texts are ignored.
    pub async fn add_task(&self, idea_id: IdeaId, text: &str) -> Result<(), StoreError> {
        let Some(text) = non_blank(text) else {
            return Ok(());
        };
        let row = NewTaskRow {
            idea_id,
            text: text.to_owned(),
            completed: false,
        };
        let created = match self.service().insert_task(&row).await {
            Ok(created) => created,
            Err(error) => {
                error!(%idea_id, %error, "Failed to save task");
                self.toast(|notifier| {
                    notifier.error("Failed to save task");
                });
                return Err(error.into());
            }
        };

        let task = Task::from_row(created, self.now());
        self.with_state_and_notifier(|state, notifier| {
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.tasks.push(task);
                notifier.update(idea_id);
            }
            notifier.success("Task added");
        });
        Ok(())
    }

    /// Flips the completion of a task. Unknown tasks are ignored.
    pub async fn toggle_task(&self, idea_id: IdeaId, task_id: TaskId) -> Result<(), StoreError> {
        let toggled = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            let task = state
                .idea_mut(idea_id)
                .and_then(|idea| idea.tasks.iter_mut().find(|task| task.id == task_id))?;
            task.completed = !task.completed;
            let completed = task.completed;
            notifier.update(idea_id);
            Some((snapshot, completed))
        });
        let Some((snapshot, completed)) = toggled else {
            debug!(%idea_id, %task_id, "Ignoring toggle of unknown task");
            return Ok(());
        };

        let changes = TaskChangesRow { completed };
        if let Err(error) = self.service().update_task(task_id, &changes).await {
            error!(%task_id, %error, "Failed to update task");
            self.with_state_and_notifier(|state, notifier| {
                snapshot.restore(state, notifier);
                notifier.update(idea_id).error("Failed to update task");
            });
            return Err(error.into());
        }
        Ok(())
    }

    /// Removes a task. It disappears immediately and comes back if the service rejects it.
    pub async fn delete_task(&self, idea_id: IdeaId, task_id: TaskId) -> Result<(), StoreError> {
        let snapshot = self.with_state_and_notifier(|state, notifier| {
            let snapshot = state.snapshot_ideas();
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.tasks.retain(|task| task.id != task_id);
                notifier.update(idea_id);
            }
            snapshot
        });

        if let Err(error) = self.service().delete_task(task_id).await {
            error!(%task_id, %error, "Failed to delete task");
            self.with_state_and_notifier(|state, notifier| {
                snapshot.restore(state, notifier);
                notifier.update(idea_id).error("Failed to delete task");
            });
            return Err(error.into());
        }
        Ok(())
    }

    /// Posts a comment as the signed-in user. Blank texts are ignored.
    pub async fn add_comment(&self, idea_id: IdeaId, text: &str) -> Result<(), StoreError> {
        let Some(text) = non_blank(text) else {
            return Ok(());
        };
        let Some(user) = self.user() else {
            self.toast(|notifier| {
                notifier.error("Sign in to post a comment");
            });
            return Err(StoreError::NotSignedIn);
        };

        let row = NewCommentRow {
            idea_id,
            user_id: user.id,
            text: text.to_owned(),
        };
        let created = match self.service().insert_comment(&row).await {
            Ok(created) => created,
            Err(error) => {
                error!(%idea_id, %error, "Failed to post comment");
                self.toast(|notifier| {
                    notifier.error("Failed to post comment");
                });
                return Err(error.into());
            }
        };

        let author = MemberDirectory::from([(user.id, user)]);
        let comment = Comment::from_row(created, &author, self.now());
        self.with_state_and_notifier(|state, notifier| {
            if let Some(idea) = state.idea_mut(idea_id) {
                idea.comments.push(comment);
                notifier.update(idea_id);
            }
            notifier.success("Comment posted");
        });
        Ok(())
    }
}
