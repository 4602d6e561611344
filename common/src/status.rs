// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Enumerations stored as text columns in the backend.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Lifecycle of an idea in the idea bank.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum IdeaStatus {
    #[default]
    Draft,
    Exploring,
    Building,
    Submitted,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum HackathonStatus {
    #[default]
    Planned,
    Active,
    Submitted,
}

impl HackathonStatus {
    /// Whether the hackathon has not been submitted yet.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Planned | Self::Active)
    }
}

/// Role of a team member.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum MemberRole {
    #[default]
    Frontend,
    Backend,
    Design,
    Product,
    Lead,
}

impl MemberRole {
    /// Maps a role column value to a role.
    ///
    /// Missing and unknown values (for example the legacy `Developer` role) fall back to
    /// [`MemberRole::Frontend`].
    pub fn normalize(role: Option<&str>) -> Self {
        role.and_then(|role| role.parse().ok()).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn normalize_role() {
        assert_eq!(MemberRole::normalize(None), MemberRole::Frontend);
        assert_eq!(MemberRole::normalize(Some("Lead")), MemberRole::Lead);
        assert_eq!(MemberRole::normalize(Some("Developer")), MemberRole::Frontend);
        assert_eq!(MemberRole::normalize(Some("design")), MemberRole::Frontend);
    }

    #[test]
    fn status_column_values() {
        let names: Vec<String> = IdeaStatus::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["Draft", "Exploring", "Building", "Submitted"]);
        assert_eq!(
            serde_json::to_string(&HackathonStatus::Active).unwrap(),
            "\"Active\""
        );
        assert_eq!("Submitted".parse(), Ok(HackathonStatus::Submitted));
    }

    #[test]
    fn upcoming_hackathons() {
        assert!(HackathonStatus::Planned.is_upcoming());
        assert!(HackathonStatus::Active.is_upcoming());
        assert!(!HackathonStatus::Submitted.is_upcoming());
    }
}
