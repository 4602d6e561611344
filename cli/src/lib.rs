// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The `hackbank` command line client.

pub mod args;
pub mod commands;
pub mod configurations;
pub mod logging;
