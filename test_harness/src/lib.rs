// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Test utilities for the HackBank client.
//!
//! [`InMemoryBackend`] stands in for the hosted data service. It keeps the tables in memory and
//! can be told to reject requests or to hold writes back, so tests can observe optimistic
//! updates and their rollback.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub use backend::{InMemoryBackend, SignUpMode};
pub use control::BackendControl;

mod backend;
mod control;

pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::fmt()
            .with_test_writer()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(Level::INFO.into())
                    .from_env_lossy(),
            )
            .try_init();
    });
}
