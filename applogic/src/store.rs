// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbcoreclient::{
    Activity, CoreClient, DataService, Hackathon, HackathonId, Idea, IdeaId, Prd, PrdUpdate,
    TaskId, TechStack,
};

/// The part of the store read and changed by the cubits.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait IdeaBankStore: Send + Sync + 'static {
    fn ideas(&self) -> Vec<Idea>;

    fn idea(&self, idea_id: IdeaId) -> Option<Idea>;

    fn hackathons(&self) -> Vec<Hackathon>;

    fn activities(&self) -> Vec<Activity>;

    fn prd(&self, idea_id: IdeaId) -> Option<Prd>;

    fn stack(&self, idea_id: IdeaId) -> Option<TechStack>;

    async fn toggle_task(&self, idea_id: IdeaId, task_id: TaskId) -> anyhow::Result<()>;

    async fn link_idea_to_hackathon(
        &self,
        hackathon_id: HackathonId,
        idea_id: IdeaId,
    ) -> anyhow::Result<()>;

    async fn update_prd(&self, idea_id: IdeaId, update: PrdUpdate) -> anyhow::Result<()>;
}

impl<S: DataService> IdeaBankStore for CoreClient<S> {
    fn ideas(&self) -> Vec<Idea> {
        CoreClient::ideas(self)
    }

    fn idea(&self, idea_id: IdeaId) -> Option<Idea> {
        CoreClient::idea(self, idea_id)
    }

    fn hackathons(&self) -> Vec<Hackathon> {
        CoreClient::hackathons(self)
    }

    fn activities(&self) -> Vec<Activity> {
        CoreClient::activities(self)
    }

    fn prd(&self, idea_id: IdeaId) -> Option<Prd> {
        CoreClient::prd(self, idea_id)
    }

    fn stack(&self, idea_id: IdeaId) -> Option<TechStack> {
        CoreClient::stack(self, idea_id)
    }

    async fn toggle_task(&self, idea_id: IdeaId, task_id: TaskId) -> anyhow::Result<()> {
        Ok(CoreClient::toggle_task(self, idea_id, task_id).await?)
    }

    async fn link_idea_to_hackathon(
        &self,
        hackathon_id: HackathonId,
        idea_id: IdeaId,
    ) -> anyhow::Result<()> {
        Ok(CoreClient::link_idea_to_hackathon(self, hackathon_id, idea_id).await?)
    }

    async fn update_prd(&self, idea_id: IdeaId, update: PrdUpdate) -> anyhow::Result<()> {
        Ok(CoreClient::update_prd(self, idea_id, update).await?)
    }
}
