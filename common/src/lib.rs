// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Identifiers, domain enums and helpers shared by the client crates.

pub mod identifiers;
pub mod stack;
pub mod status;
pub mod time;
pub mod utils;
