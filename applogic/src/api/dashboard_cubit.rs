// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Dashboard feature

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hbcommon::time::days_until;
use hbcoreclient::{
    Activity, CoreClient, DataService, Hackathon, Idea, StoreEntityId, StoreNotification,
};
use tokio::sync::watch;
use tokio_stream::{Stream, wrappers::WatchStream};

use crate::{
    store::IdeaBankStore,
    util::{CubitContext, CubitCore, spawn_store_notifications_loop},
};

const FEATURED_IDEAS: usize = 3;
const RECENT_ACTIVITIES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// The ideas with the most progress, at most three.
    pub featured_ideas: Vec<Idea>,
    pub upcoming_hackathon: Option<UpcomingHackathon>,
    /// The newest activities, at most five.
    pub recent_activity: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingHackathon {
    pub hackathon: Hackathon,
    /// E.g. `3 days left` or `Ended`.
    pub time_left: String,
}

impl DashboardState {
    pub fn new(
        mut ideas: Vec<Idea>,
        hackathons: &[Hackathon],
        mut activities: Vec<Activity>,
        now: DateTime<Utc>,
    ) -> Self {
        // stable: ties keep the order of the idea bank
        ideas.sort_by(|a, b| b.progress.cmp(&a.progress));
        ideas.truncate(FEATURED_IDEAS);
        activities.truncate(RECENT_ACTIVITIES);
        let upcoming_hackathon = hackathons
            .iter()
            .find(|hackathon| hackathon.status.is_upcoming())
            .map(|hackathon| UpcomingHackathon {
                time_left: time_left(hackathon.deadline, now),
                hackathon: hackathon.clone(),
            });
        Self {
            featured_ideas: ideas,
            upcoming_hackathon,
            recent_activity: activities,
        }
    }
}

pub fn time_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match days_until(deadline, now) {
        days if days > 0 => format!("{days} days left"),
        _ => "Ended".to_owned(),
    }
}

/// Provides the dashboard.
pub struct DashboardCubit<D: DataService> {
    core: CubitCore<DashboardState>,
    _context: DashboardContext<CoreClient<D>>,
}

impl<D: DataService> DashboardCubit<D> {
    /// Loads the dashboard and keeps it up to date in the background.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(client: &CoreClient<D>) -> Self {
        let core = CubitCore::new();
        let context = DashboardContext::new(client.clone(), core.state_tx().clone());
        context.spawn(client.subscribe(), core.cancellation_token().clone());
        Self {
            core,
            _context: context,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    pub fn close(&mut self) {
        self.core.close();
    }

    pub fn state(&self) -> DashboardState {
        self.core.state()
    }

    pub fn stream(&self) -> WatchStream<DashboardState> {
        self.core.stream()
    }
}

#[derive(Clone)]
struct DashboardContext<S> {
    store: S,
    state_tx: watch::Sender<DashboardState>,
}

impl<S: IdeaBankStore + Clone> DashboardContext<S> {
    fn new(store: S, state_tx: watch::Sender<DashboardState>) -> Self {
        Self { store, state_tx }
    }

    fn spawn(
        &self,
        store_notifications: impl Stream<Item = Arc<StoreNotification>> + Send + Unpin + 'static,
        stop: tokio_util::sync::CancellationToken,
    ) {
        self.load_and_emit_state();
        spawn_store_notifications_loop(self.clone(), store_notifications, stop);
    }
}

impl<S: IdeaBankStore> CubitContext for DashboardContext<S> {
    fn load_and_emit_state(&self) {
        let state = DashboardState::new(
            self.store.ideas(),
            &self.store.hackathons(),
            self.store.activities(),
            Utc::now(),
        );
        self.state_tx.send_replace(state);
    }

    fn is_affected_by(&self, notification: &StoreNotification) -> bool {
        notification.ops.iter().any(|(id, op)| {
            !op.is_empty()
                && matches!(
                    id,
                    StoreEntityId::Idea(_)
                        | StoreEntityId::Hackathon(_)
                        | StoreEntityId::Activities
                )
        })
    }
}
