// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Value of the `X-Client-Info` header sent with every request.
pub(super) const CLIENT_INFO: &str = concat!("hackbank-rs/", env!("CARGO_PKG_VERSION"));
