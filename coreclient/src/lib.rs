// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Client state store of the HackBank idea tracker.
//!
//! [`clients::CoreClient`] mirrors the tables of the hosted data service in memory. Mutations are
//! applied optimistically to the local state, sent to the service, and rolled back to the
//! previous snapshot if the service rejects them. Changes are published as
//! [`store::StoreNotification`]s.

pub mod activities;
pub mod clients;
pub mod hackathons;
pub mod ideas;
pub mod members;
pub mod prds;
pub mod service;
pub mod stacks;
pub mod store;

pub use hbapiclient::auth_api::{AuthUser, Web3Chain};
pub use hbcommon::{
    identifiers::{ActivityId, CommentId, HackathonId, IdeaId, TaskId, UserId},
    stack::StackCategory,
    status::{HackathonStatus, IdeaStatus, MemberRole},
};

pub use activities::Activity;
pub use clients::{CoreClient, SignedMessage, StoreError, WalletSigner};
pub use hackathons::{Hackathon, HackathonUpdate, NewHackathon, build_hackathon_links};
pub use ideas::{Comment, Idea, IdeaSections, IdeaUpdate, NewIdea, Task};
pub use members::Member;
pub use prds::{Prd, PrdListField, PrdUpdate};
pub use service::{DataService, DataServiceError, DataServiceErrorKind, DataServiceResult};
pub use stacks::{StackUpdate, TechStack};
pub use store::{
    AppState, StoreEntityId, StoreNotification, StoreOperation, Toast, ToastKind,
};
