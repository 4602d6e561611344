// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use hbapiclient::rows::ProfileRow;
use hbcommon::{identifiers::UserId, status::MemberRole};

/// A team member, i.e. a user with a profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub id: UserId,
    pub name: String,
    pub role: MemberRole,
    pub avatar_url: Option<String>,
}

impl From<ProfileRow> for Member {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: MemberRole::normalize(row.role.as_deref()),
            avatar_url: row.avatar_url,
        }
    }
}

/// Members indexed by their id; used to resolve the author names of comments.
pub(crate) type MemberDirectory = HashMap<UserId, Member>;

/// Indexes the members by id.
///
/// If the current user's profile is not among the members, it is prepended to the list.
pub(crate) fn member_directory(
    members: &mut Vec<Member>,
    current: Option<&Member>,
) -> MemberDirectory {
    let mut directory: MemberDirectory = members
        .iter()
        .map(|member| (member.id, member.clone()))
        .collect();
    if let Some(current) = current
        && !directory.contains_key(&current.id)
    {
        members.insert(0, current.clone());
        directory.insert(current.id, current.clone());
    }
    directory
}
