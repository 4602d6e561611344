// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use hbcoreclient::{CoreClient, StoreNotification, Toast, UserId};
use hbtest_harness::{InMemoryBackend, init_test_tracing};
use secrecy::SecretString;
use tokio_stream::{Stream, StreamExt};

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct horse";

pub fn password(password: &str) -> SecretString {
    SecretString::from(password.to_owned())
}

/// A backend with an account for [`EMAIL`] whose profile is `Ada` and a client for it.
pub fn setup() -> (CoreClient<InMemoryBackend>, InMemoryBackend, UserId) {
    init_test_tracing();
    let backend = InMemoryBackend::new();
    let user_id = backend.add_account(EMAIL, PASSWORD, Some("Ada"));
    backend.seed_profile(user_id, "Ada", Some("Lead"));
    let client = CoreClient::new(backend.clone());
    (client, backend, user_id)
}

/// Like [`setup`], but signed in.
pub async fn signed_in() -> (CoreClient<InMemoryBackend>, InMemoryBackend, UserId) {
    let (client, backend, user_id) = setup();
    client.sign_in(EMAIL, &password(PASSWORD)).await.unwrap();
    (client, backend, user_id)
}

/// Collects the notifications published so far.
pub async fn drain(
    notifications: &mut (impl Stream<Item = Arc<StoreNotification>> + Unpin),
) -> Vec<Arc<StoreNotification>> {
    let mut drained = Vec::new();
    while let Ok(Some(notification)) =
        tokio::time::timeout(Duration::from_millis(20), notifications.next()).await
    {
        drained.push(notification);
    }
    drained
}

/// The toasts of the notifications published so far.
pub async fn toasts(
    notifications: &mut (impl Stream<Item = Arc<StoreNotification>> + Unpin),
) -> Vec<Toast> {
    drain(notifications)
        .await
        .iter()
        .flat_map(|notification| notification.toasts.iter().cloned())
        .collect()
}

/// Waits until `condition` holds, giving spawned operations time to start.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}
