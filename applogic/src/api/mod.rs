// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod dashboard_cubit;
pub mod hackathons_cubit;
pub mod idea_details_cubit;
pub mod ideas_cubit;
pub mod prd_editor;
