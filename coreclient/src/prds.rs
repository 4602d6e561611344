// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Product requirement documents, one per idea.

use hbapiclient::rows::{PrdChangesRow, PrdRow};
use hbcommon::identifiers::IdeaId;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prd {
    pub idea_id: IdeaId,
    pub overview: String,
    pub goals: String,
    pub non_goals: String,
    pub user_stories: Vec<String>,
    pub mvp_scope: Vec<String>,
    pub success_metrics: Vec<String>,
    pub risks: Vec<String>,
    pub open_questions: Vec<String>,
}

impl Prd {
    /// A PRD without any content.
    pub fn empty(idea_id: IdeaId) -> Self {
        Self {
            idea_id,
            overview: String::new(),
            goals: String::new(),
            non_goals: String::new(),
            user_stories: Vec::new(),
            mvp_scope: Vec::new(),
            success_metrics: Vec::new(),
            risks: Vec::new(),
            open_questions: Vec::new(),
        }
    }

    pub fn list(&self, field: PrdListField) -> &[String] {
        match field {
            PrdListField::UserStories => &self.user_stories,
            PrdListField::MvpScope => &self.mvp_scope,
            PrdListField::SuccessMetrics => &self.success_metrics,
            PrdListField::Risks => &self.risks,
            PrdListField::OpenQuestions => &self.open_questions,
        }
    }

    pub(crate) fn apply(&mut self, update: &PrdUpdate) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        set(&mut self.overview, &update.overview);
        set(&mut self.goals, &update.goals);
        set(&mut self.non_goals, &update.non_goals);
        set(&mut self.user_stories, &update.user_stories);
        set(&mut self.mvp_scope, &update.mvp_scope);
        set(&mut self.success_metrics, &update.success_metrics);
        set(&mut self.risks, &update.risks);
        set(&mut self.open_questions, &update.open_questions);
    }
}

impl From<PrdRow> for Prd {
    fn from(row: PrdRow) -> Self {
        Self {
            idea_id: row.idea_id,
            overview: row.overview.unwrap_or_default(),
            goals: row.goals.unwrap_or_default(),
            non_goals: row.non_goals.unwrap_or_default(),
            user_stories: row.user_stories.unwrap_or_default(),
            mvp_scope: row.mvp_scope.unwrap_or_default(),
            success_metrics: row.success_metrics.unwrap_or_default(),
            risks: row.risks.unwrap_or_default(),
            open_questions: row.open_questions.unwrap_or_default(),
        }
    }
}

/// The list sections of a PRD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PrdListField {
    #[strum(to_string = "User stories")]
    UserStories,
    #[strum(to_string = "MVP scope")]
    MvpScope,
    #[strum(to_string = "Success metrics")]
    SuccessMetrics,
    #[strum(to_string = "Risks")]
    Risks,
    #[strum(to_string = "Open questions")]
    OpenQuestions,
}

/// Partial update of a PRD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrdUpdate {
    pub overview: Option<String>,
    pub goals: Option<String>,
    pub non_goals: Option<String>,
    pub user_stories: Option<Vec<String>>,
    pub mvp_scope: Option<Vec<String>>,
    pub success_metrics: Option<Vec<String>>,
    pub risks: Option<Vec<String>>,
    pub open_questions: Option<Vec<String>>,
}

impl PrdUpdate {
    /// An update replacing a single list section.
    pub fn with_list(field: PrdListField, items: Vec<String>) -> Self {
        let mut update = Self::default();
        let slot = match field {
            PrdListField::UserStories => &mut update.user_stories,
            PrdListField::MvpScope => &mut update.mvp_scope,
            PrdListField::SuccessMetrics => &mut update.success_metrics,
            PrdListField::Risks => &mut update.risks,
            PrdListField::OpenQuestions => &mut update.open_questions,
        };
        *slot = Some(items);
        update
    }

    pub(crate) fn to_changes(&self, idea_id: IdeaId) -> PrdChangesRow {
        PrdChangesRow {
            idea_id,
            overview: self.overview.clone(),
            goals: self.goals.clone(),
            non_goals: self.non_goals.clone(),
            user_stories: self.user_stories.clone(),
            mvp_scope: self.mvp_scope.clone(),
            success_metrics: self.success_metrics.clone(),
            risks: self.risks.clone(),
            open_questions: self.open_questions.clone(),
        }
    }
}
