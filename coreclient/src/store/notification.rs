// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::BTreeMap, sync::Arc};

use enumset::{EnumSet, EnumSetType};
use hbcommon::identifiers::{HackathonId, IdeaId};
use tokio::sync::broadcast;
use tracing::{debug, trace};

const NOTIFICATION_CHANNEL_SIZE: usize = 1024;

pub(crate) type StoreNotificationsSender = broadcast::Sender<Arc<StoreNotification>>;

pub(crate) fn store_notifications_channel() -> StoreNotificationsSender {
    broadcast::channel(NOTIFICATION_CHANNEL_SIZE).0
}

/// Identifies a part of the state that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreEntityId {
    /// The signed-in user.
    User,
    Members,
    Activities,
    /// The `loading` flag of the state.
    Loading,
    Idea(IdeaId),
    Hackathon(HackathonId),
    /// The PRD of an idea.
    Prd(IdeaId),
    /// The tech stack of an idea.
    Stack(IdeaId),
}

impl From<IdeaId> for StoreEntityId {
    fn from(id: IdeaId) -> Self {
        Self::Idea(id)
    }
}

impl From<HackathonId> for StoreEntityId {
    fn from(id: HackathonId) -> Self {
        Self::Hackathon(id)
    }
}

#[derive(Debug, EnumSetType)]
pub enum StoreOperation {
    Add,
    Update,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

/// A short message for the user about the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Changes of the state published after an operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreNotification {
    pub ops: BTreeMap<StoreEntityId, EnumSet<StoreOperation>>,
    pub toasts: Vec<Toast>,
}

impl StoreNotification {
    fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.toasts.is_empty()
    }

    /// Whether any entity matching `predicate` changed.
    pub fn any(&self, predicate: impl Fn(&StoreEntityId) -> bool) -> bool {
        self.ops
            .iter()
            .any(|(id, ops)| !ops.is_empty() && predicate(id))
    }
}

/// Collects changes and sends them out as a single [`StoreNotification`].
///
/// Pending changes are dropped if [`StoreNotifier::notify`] is not called.
pub(crate) struct StoreNotifier {
    tx: Option<StoreNotificationsSender>,
    notification: StoreNotification,
}

impl StoreNotifier {
    pub(crate) fn new(tx: StoreNotificationsSender) -> Self {
        Self {
            tx: Some(tx),
            notification: Default::default(),
        }
    }

    /// A notifier that discards everything.
    #[cfg(test)]
    pub(crate) fn noop() -> Self {
        Self {
            tx: None,
            notification: Default::default(),
        }
    }

    pub(crate) fn add(&mut self, id: impl Into<StoreEntityId>) -> &mut Self {
        self.op(id.into(), StoreOperation::Add)
    }

    pub(crate) fn update(&mut self, id: impl Into<StoreEntityId>) -> &mut Self {
        self.op(id.into(), StoreOperation::Update)
    }

    pub(crate) fn remove(&mut self, id: impl Into<StoreEntityId>) -> &mut Self {
        self.op(id.into(), StoreOperation::Remove)
    }

    pub(crate) fn success(&mut self, message: impl Into<String>) -> &mut Self {
        self.notification.toasts.push(Toast::success(message));
        self
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) -> &mut Self {
        self.notification.toasts.push(Toast::error(message));
        self
    }

    fn op(&mut self, id: StoreEntityId, op: StoreOperation) -> &mut Self {
        *self.notification.ops.entry(id).or_default() |= op;
        self
    }

    /// Sends the collected changes, if any.
    pub(crate) fn notify(&mut self) {
        let notification = std::mem::take(&mut self.notification);
        if notification.is_empty() {
            return;
        }
        let Some(tx) = &self.tx else {
            trace!(?notification, "Dropping notification of noop notifier");
            return;
        };
        debug!(
            entities = notification.ops.len(),
            toasts = notification.toasts.len(),
            "Store notification"
        );
        // No receivers is not an error
        let _ = tx.send(Arc::new(notification));
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn ops_are_merged_per_entity() {
        let tx = store_notifications_channel();
        let mut rx = tx.subscribe();
        let idea_id = IdeaId::new(Uuid::from_u128(1));

        let mut notifier = StoreNotifier::new(tx);
        notifier
            .add(idea_id)
            .update(idea_id)
            .update(StoreEntityId::Members)
            .success("Idea created!");
        notifier.notify();

        let notification = rx.try_recv().unwrap();
        assert_eq!(
            notification.ops[&StoreEntityId::Idea(idea_id)],
            StoreOperation::Add | StoreOperation::Update
        );
        assert_eq!(notification.toasts, [Toast::success("Idea created!")]);
        assert!(notification.any(|id| matches!(id, StoreEntityId::Members)));
        assert!(!notification.any(|id| matches!(id, StoreEntityId::Activities)));
    }

    #[test]
    fn empty_notifications_are_not_sent() {
        let tx = store_notifications_channel();
        let mut rx = tx.subscribe();
        StoreNotifier::new(tx).notify();
        assert!(rx.try_recv().is_err());

        let mut notifier = StoreNotifier::noop();
        notifier.error("Failed to save task").notify();
    }
}
