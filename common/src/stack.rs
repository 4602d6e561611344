// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Catalog of technologies offered by the tech stack picker.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A column of the `tech_stacks` table holding a list of technologies.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StackCategory {
    Frontend,
    Backend,
    Infra,
    Apis,
}

impl StackCategory {
    /// The technologies offered for this category.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Frontend => &[
                "React",
                "Vue",
                "Next.js",
                "Svelte",
                "Angular",
                "Tailwind",
                "Chakra UI",
            ],
            Self::Backend => &["Node.js", "Python", "Go", "Rust", "Supabase", "Firebase"],
            Self::Infra => &["AWS", "Vercel", "Netlify", "Docker", "Kubernetes"],
            Self::Apis => &["OpenAI", "Stripe", "Twilio", "SendGrid"],
        }
    }
}
