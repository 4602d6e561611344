// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use hbapiclient::rows::{
    ActivityRow, CommentRow, HackathonRow, IdeaRow, PrdRow, ProfileRow, TaskRow, TechStackRow,
};
use hbcommon::identifiers::{HackathonId, IdeaId};
use tracing::{error, info};

use crate::{
    activities::Activity,
    hackathons::{Hackathon, build_hackathon_links},
    ideas::{Comment, Idea, Task},
    members::{Member, member_directory},
    prds::Prd,
    service::{DataService, DataServiceError},
    stacks::TechStack,
    store::{AppState, StoreEntityId, StoreNotifier},
};

use super::CoreClient;

/// All rows of the tables mirrored by the client.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub(crate) ideas: Vec<IdeaRow>,
    pub(crate) hackathons: Vec<HackathonRow>,
    pub(crate) tasks: Vec<TaskRow>,
    pub(crate) comments: Vec<CommentRow>,
    pub(crate) prds: Vec<PrdRow>,
    pub(crate) stacks: Vec<TechStackRow>,
    pub(crate) profiles: Vec<ProfileRow>,
    pub(crate) activities: Vec<ActivityRow>,
}

/// The collections of [`AppState`] built from the fetched rows.
#[derive(Debug)]
pub(crate) struct LoadedState {
    pub(crate) members: Vec<Member>,
    pub(crate) ideas: Vec<Idea>,
    pub(crate) hackathons: Vec<Hackathon>,
    pub(crate) prds: HashMap<IdeaId, Prd>,
    pub(crate) stacks: HashMap<IdeaId, TechStack>,
    pub(crate) activities: Vec<Activity>,
}

impl Collections {
    pub(crate) fn into_state(self, current: Option<&Member>, now: DateTime<Utc>) -> LoadedState {
        let mut members: Vec<Member> = self.profiles.into_iter().map(Member::from).collect();
        let directory = member_directory(&mut members, current);

        // Rows are fetched in display order; grouping keeps it.
        let mut tasks: HashMap<IdeaId, Vec<Task>> = HashMap::new();
        for row in self.tasks {
            if let Some(idea_id) = row.idea_id {
                tasks
                    .entry(idea_id)
                    .or_default()
                    .push(Task::from_row(row, now));
            }
        }
        let mut comments: HashMap<IdeaId, Vec<Comment>> = HashMap::new();
        for row in self.comments {
            if let Some(idea_id) = row.idea_id {
                comments
                    .entry(idea_id)
                    .or_default()
                    .push(Comment::from_row(row, &directory, now));
            }
        }

        let ideas: Vec<Idea> = self
            .ideas
            .into_iter()
            .map(|row| {
                let mut idea = Idea::from_row(row, now);
                idea.tasks = tasks.remove(&idea.id).unwrap_or_default();
                idea.comments = comments.remove(&idea.id).unwrap_or_default();
                idea
            })
            .collect();

        let hackathons = build_hackathon_links(
            &ideas,
            self.hackathons.into_iter().map(Hackathon::from).collect(),
        );

        LoadedState {
            members,
            ideas,
            hackathons,
            prds: self
                .prds
                .into_iter()
                .map(|row| (row.idea_id, Prd::from(row)))
                .collect(),
            stacks: self
                .stacks
                .into_iter()
                .map(|row| (row.idea_id, TechStack::from(row)))
                .collect(),
            activities: self
                .activities
                .into_iter()
                .map(|row| Activity::from_row(row, now))
                .collect(),
        }
    }
}

impl<S: DataService> CoreClient<S> {
    /// Loads all collections and replaces the current ones.
    ///
    /// If any table fails to load, the user is notified and the current collections are kept.
    pub async fn fetch_initial_data(&self) {
        self.with_state_and_notifier(|state, notifier| {
            state.loading = true;
            notifier.update(StoreEntityId::Loading);
        });

        let service = self.service();
        let fetched = tokio::try_join!(
            service.ideas(),
            service.hackathons(),
            service.tasks(),
            service.comments(),
            service.prds(),
            service.tech_stacks(),
            service.profiles(),
            service.activities(),
            async { Ok::<_, DataServiceError>(self.fetch_current_profile().await) },
        );

        let (ideas, hackathons, tasks, comments, prds, stacks, profiles, activities, current) =
            match fetched {
                Ok(fetched) => fetched,
                Err(error) => {
                    error!(%error, "Error loading data");
                    self.with_state_and_notifier(|state, notifier| {
                        state.loading = false;
                        notifier
                            .update(StoreEntityId::Loading)
                            .error("Failed to load data from Supabase");
                    });
                    return;
                }
            };

        let collections = Collections {
            ideas,
            hackathons,
            tasks,
            comments,
            prds,
            stacks,
            profiles,
            activities,
        };
        let loaded = collections.into_state(current.as_ref(), self.now());
        info!(
            ideas = loaded.ideas.len(),
            hackathons = loaded.hackathons.len(),
            members = loaded.members.len(),
            "Loaded data"
        );

        self.with_state_and_notifier(|state, notifier| {
            notify_replaced(state, &loaded, notifier);
            state.members = loaded.members;
            state.ideas = loaded.ideas;
            state.hackathons = loaded.hackathons;
            state.prds = loaded.prds;
            state.stacks = loaded.stacks;
            state.activities = loaded.activities;
            if current.is_some() {
                state.user = current;
            }
            state.loading = false;
            notifier.update(StoreEntityId::Loading);
        });
    }
}

/// Records the differences between the current collections and the loaded ones.
fn notify_replaced(
    state: &AppState,
    loaded: &LoadedState,
    notifier: &mut StoreNotifier,
) {
    let previous_ideas: HashSet<IdeaId> = state.ideas.iter().map(|idea| idea.id).collect();
    for idea in &loaded.ideas {
        if previous_ideas.contains(&idea.id) {
            notifier.update(idea.id);
        } else {
            notifier.add(idea.id);
        }
    }
    let loaded_ideas: HashSet<IdeaId> = loaded.ideas.iter().map(|idea| idea.id).collect();
    for idea_id in previous_ideas.difference(&loaded_ideas) {
        notifier.remove(*idea_id);
    }

    for hackathon in &state.hackathons {
        if loaded.hackathon_ids().all(|id| id != hackathon.id) {
            notifier.remove(hackathon.id);
        }
    }
    for hackathon_id in loaded.hackathon_ids() {
        notifier.update(hackathon_id);
    }

    for idea_id in state.prds.keys().chain(loaded.prds.keys()) {
        notifier.update(StoreEntityId::Prd(*idea_id));
    }
    for idea_id in state.stacks.keys().chain(loaded.stacks.keys()) {
        notifier.update(StoreEntityId::Stack(*idea_id));
    }
    notifier
        .update(StoreEntityId::User)
        .update(StoreEntityId::Members)
        .update(StoreEntityId::Activities);
}

impl LoadedState {
    fn hackathon_ids(&self) -> impl Iterator<Item = HackathonId> + '_ {
        self.hackathons.iter().map(|hackathon| hackathon.id)
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use hbcommon::identifiers::{CommentId, TaskId, UserId};
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap()
    }

    fn idea_row(n: u128, hackathon: Option<u128>) -> IdeaRow {
        IdeaRow {
            id: IdeaId::new(Uuid::from_u128(n)),
            title: format!("Idea {n}"),
            description: None,
            tags: None,
            status: None,
            level: None,
            progress: None,
            hackathon_id: hackathon.map(|n| HackathonId::new(Uuid::from_u128(n))),
            sections: None,
            owner_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn task_row(n: u128, idea: Option<u128>) -> TaskRow {
        TaskRow {
            id: TaskId::new(Uuid::from_u128(n)),
            idea_id: idea.map(|n| IdeaId::new(Uuid::from_u128(n))),
            text: format!("Task {n}"),
            completed: None,
            created_at: None,
        }
    }

    fn profile(n: u128, name: &str) -> ProfileRow {
        ProfileRow {
            id: UserId::new(Uuid::from_u128(n)),
            name: name.to_owned(),
            role: None,
            avatar_url: None,
        }
    }

    #[test]
    fn tasks_and_comments_are_grouped_in_order() {
        let collections = Collections {
            ideas: vec![idea_row(1, Some(50)), idea_row(2, None)],
            hackathons: vec![HackathonRow {
                id: HackathonId::new(Uuid::from_u128(50)),
                name: "Jam".to_owned(),
                deadline: now(),
                theme: None,
                prizes: None,
                status: None,
            }],
            tasks: vec![task_row(10, Some(1)), task_row(11, None), task_row(12, Some(1))],
            comments: vec![
                CommentRow {
                    id: CommentId::new(Uuid::from_u128(20)),
                    idea_id: Some(IdeaId::new(Uuid::from_u128(2))),
                    user_id: UserId::new(Uuid::from_u128(100)),
                    text: "Nice".to_owned(),
                    created_at: None,
                },
                CommentRow {
                    id: CommentId::new(Uuid::from_u128(21)),
                    idea_id: None,
                    user_id: UserId::new(Uuid::from_u128(100)),
                    text: "Orphan".to_owned(),
                    created_at: None,
                },
            ],
            profiles: vec![profile(100, "Ada")],
            ..Default::default()
        };

        let loaded = collections.into_state(None, now());
        let tasks: Vec<_> = loaded.ideas[0].tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(tasks, ["Task 10", "Task 12"]);
        assert!(loaded.ideas[1].tasks.is_empty());
        assert_eq!(loaded.ideas[1].comments.len(), 1);
        assert_eq!(loaded.ideas[1].comments[0].user_name, "Ada");
        assert_eq!(
            loaded.hackathons[0].linked_idea_ids,
            [IdeaId::new(Uuid::from_u128(1))]
        );
    }

    #[test]
    fn current_profile_joins_the_members() {
        let me = Member::from(profile(7, "Linus"));
        let collections = Collections {
            profiles: vec![profile(100, "Ada")],
            comments: vec![CommentRow {
                id: CommentId::new(Uuid::from_u128(20)),
                idea_id: Some(IdeaId::new(Uuid::from_u128(1))),
                user_id: me.id,
                text: "Mine".to_owned(),
                created_at: None,
            }],
            ideas: vec![idea_row(1, None)],
            ..Default::default()
        };
        let loaded = collections.into_state(Some(&me), now());
        assert_eq!(loaded.members[0], me);
        assert_eq!(loaded.members.len(), 2);
        assert_eq!(loaded.ideas[0].comments[0].user_name, "Linus");
    }

    #[test]
    fn prds_and_stacks_are_keyed_by_idea() {
        let idea_id = IdeaId::new(Uuid::from_u128(1));
        let collections = Collections {
            prds: vec![PrdRow {
                idea_id,
                overview: Some("Overview".to_owned()),
                goals: None,
                non_goals: None,
                user_stories: None,
                mvp_scope: None,
                success_metrics: None,
                risks: None,
                open_questions: None,
            }],
            stacks: vec![TechStackRow {
                idea_id,
                frontend: Some(vec!["Svelte".to_owned()]),
                backend: None,
                infra: None,
                apis: None,
                notes: None,
            }],
            ..Default::default()
        };
        let loaded = collections.into_state(None, now());
        assert_eq!(loaded.prds[&idea_id].overview, "Overview");
        assert_eq!(loaded.stacks[&idea_id].frontend, ["Svelte"]);
        assert_eq!(loaded.stacks[&idea_id].notes, "");
    }
}
