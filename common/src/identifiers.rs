// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed identifiers of the rows stored by the backend.
//!
//! All tables use UUID primary keys. The wrappers make it impossible to pass an idea id where a
//! hackathon id is expected.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

uuid_identifier!(
    /// Id of an authenticated user; also the primary key of the user's profile.
    UserId
);
uuid_identifier!(IdeaId);
uuid_identifier!(TaskId);
uuid_identifier!(CommentId);
uuid_identifier!(HackathonId);
uuid_identifier!(ActivityId);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_as_plain_uuid_string() {
        let id = IdeaId::new(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
        let parsed: IdeaId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parses_from_str() {
        let id: HackathonId = "00000000-0000-0000-0000-00000000002a".parse().unwrap();
        assert_eq!(id.uuid(), Uuid::from_u128(42));
        assert!("not-a-uuid".parse::<HackathonId>().is_err());
    }
}
