// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::rows::{TechStackChangesRow, TechStackRow};
use hbcommon::{identifiers::IdeaId, stack::StackCategory};

/// Technologies chosen to build an idea.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TechStack {
    pub idea_id: IdeaId,
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub infra: Vec<String>,
    pub apis: Vec<String>,
    pub notes: String,
}

impl TechStack {
    pub fn empty(idea_id: IdeaId) -> Self {
        Self {
            idea_id,
            frontend: Vec::new(),
            backend: Vec::new(),
            infra: Vec::new(),
            apis: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn items(&self, category: StackCategory) -> &[String] {
        match category {
            StackCategory::Frontend => &self.frontend,
            StackCategory::Backend => &self.backend,
            StackCategory::Infra => &self.infra,
            StackCategory::Apis => &self.apis,
        }
    }

    pub(crate) fn apply(&mut self, update: &StackUpdate) {
        for (category, items) in [
            (StackCategory::Frontend, &update.frontend),
            (StackCategory::Backend, &update.backend),
            (StackCategory::Infra, &update.infra),
            (StackCategory::Apis, &update.apis),
        ] {
            if let Some(items) = items {
                self.items_mut(category).clone_from(items);
            }
        }
        if let Some(notes) = &update.notes {
            self.notes.clone_from(notes);
        }
    }

    fn items_mut(&mut self, category: StackCategory) -> &mut Vec<String> {
        match category {
            StackCategory::Frontend => &mut self.frontend,
            StackCategory::Backend => &mut self.backend,
            StackCategory::Infra => &mut self.infra,
            StackCategory::Apis => &mut self.apis,
        }
    }

    /// The items of `category` with `item` added, or removed if it was already chosen.
    pub(crate) fn toggled(&self, category: StackCategory, item: &str) -> Vec<String> {
        let items = self.items(category);
        if items.iter().any(|chosen| chosen == item) {
            items
                .iter()
                .filter(|chosen| *chosen != item)
                .cloned()
                .collect()
        } else {
            let mut items = items.to_vec();
            items.push(item.to_owned());
            items
        }
    }
}

impl From<TechStackRow> for TechStack {
    fn from(row: TechStackRow) -> Self {
        Self {
            idea_id: row.idea_id,
            frontend: row.frontend.unwrap_or_default(),
            backend: row.backend.unwrap_or_default(),
            infra: row.infra.unwrap_or_default(),
            apis: row.apis.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

/// Partial update of a tech stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackUpdate {
    pub frontend: Option<Vec<String>>,
    pub backend: Option<Vec<String>>,
    pub infra: Option<Vec<String>>,
    pub apis: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl StackUpdate {
    /// An update replacing the items of a single category.
    pub fn with_category(category: StackCategory, items: Vec<String>) -> Self {
        let mut update = Self::default();
        let slot = match category {
            StackCategory::Frontend => &mut update.frontend,
            StackCategory::Backend => &mut update.backend,
            StackCategory::Infra => &mut update.infra,
            StackCategory::Apis => &mut update.apis,
        };
        *slot = Some(items);
        update
    }

    pub(crate) fn to_changes(&self, idea_id: IdeaId) -> TechStackChangesRow {
        TechStackChangesRow {
            idea_id,
            frontend: self.frontend.clone(),
            backend: self.backend.clone(),
            infra: self.infra.clone(),
            apis: self.apis.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut stack = TechStack::empty(IdeaId::new(Uuid::from_u128(1)));
        let items = stack.toggled(StackCategory::Backend, "Rust");
        assert_eq!(items, ["Rust"]);

        stack.apply(&StackUpdate::with_category(StackCategory::Backend, items));
        assert_eq!(stack.items(StackCategory::Backend), ["Rust"]);
        assert!(stack.items(StackCategory::Frontend).is_empty());

        let items = stack.toggled(StackCategory::Backend, "Rust");
        assert!(items.is_empty());
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut stack = TechStack {
            notes: "Keep it simple".to_owned(),
            infra: vec!["Docker".to_owned()],
            ..TechStack::empty(IdeaId::new(Uuid::from_u128(1)))
        };
        stack.apply(&StackUpdate {
            apis: Some(vec!["Stripe".to_owned()]),
            ..Default::default()
        });
        assert_eq!(stack.notes, "Keep it simple");
        assert_eq!(stack.infra, ["Docker"]);
        assert_eq!(stack.apis, ["Stripe"]);
    }
}
