// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::service::DataServiceError;

/// Errors returned by the operations of [`CoreClient`](super::CoreClient).
///
/// The user has already been informed by a toast, except for auth errors, which are returned to
/// the sign-in form.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Sign up failed")]
    SignUpFailed,
    /// The wallet failed to sign the sign-in message, e.g. because the user declined.
    #[error("Wallet signing failed: {0}")]
    Wallet(anyhow::Error),
    #[error(transparent)]
    Backend(#[from] DataServiceError),
}
