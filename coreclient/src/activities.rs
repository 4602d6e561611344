// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use hbapiclient::rows::ActivityRow;
use hbcommon::identifiers::{ActivityId, UserId};

/// An entry of the activity feed.
///
/// The feed is written by the backend only; the client never creates activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub action: String,
    pub target: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub(crate) fn from_row(row: ActivityRow, now: DateTime<Utc>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name.unwrap_or_else(|| "Unknown".to_owned()),
            action: row.action,
            target: row.target,
            timestamp: row.timestamp.unwrap_or(now),
        }
    }
}
