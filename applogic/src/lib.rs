// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! View models of the HackBank client.
//!
//! Each cubit holds a state derived from the [`CoreClient`](hbcoreclient::CoreClient) and
//! reloads it when the store publishes a relevant change.

pub mod api;
pub(crate) mod store;
pub(crate) mod util;
