// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Editing the list sections of a PRD.
//!
//! Lists are always written as a whole, so both helpers return an update replacing the list.

use hbcoreclient::{Prd, PrdListField, PrdUpdate};

/// Appends an empty item to `field`.
pub fn add_list_item(prd: &Prd, field: PrdListField) -> PrdUpdate {
    let mut items = prd.list(field).to_vec();
    items.push(String::new());
    PrdUpdate::with_list(field, items)
}

/// Replaces the item at `index` of `field`. An index out of range leaves the list unchanged.
pub fn update_list_item(
    prd: &Prd,
    field: PrdListField,
    index: usize,
    value: impl Into<String>,
) -> PrdUpdate {
    let mut items = prd.list(field).to_vec();
    if let Some(item) = items.get_mut(index) {
        *item = value.into();
    }
    PrdUpdate::with_list(field, items)
}
