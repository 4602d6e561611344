// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use hbapplogic::api::{
    dashboard_cubit::DashboardCubit, idea_details_cubit::IdeaDetailsCubit,
    ideas_cubit::IdeasCubit,
};
use hbcoreclient::{CoreClient, IdeaStatus, IdeaUpdate, NewIdea};
use hbtest_harness::{InMemoryBackend, init_test_tracing};
use secrecy::SecretString;
use tokio_stream::StreamExt;

async fn signed_in() -> (CoreClient<InMemoryBackend>, InMemoryBackend) {
    init_test_tracing();
    let backend = InMemoryBackend::new();
    backend.add_account("ada@example.com", "pw", Some("Ada"));
    let client = CoreClient::new(backend.clone());
    client
        .sign_in("ada@example.com", &SecretString::from("pw".to_owned()))
        .await
        .unwrap();
    (client, backend)
}

#[tokio::test]
async fn dashboard_follows_the_store() {
    let (client, _) = signed_in().await;
    let cubit = DashboardCubit::new(&client);
    assert!(cubit.state().featured_ideas.is_empty());
    let mut states = cubit.stream();
    states.next().await.unwrap();

    client.add_idea(NewIdea::new("Focus Timer")).await.unwrap();

    let state = tokio::time::timeout(Duration::from_secs(1), states.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.featured_ideas[0].title, "Focus Timer");
}

#[tokio::test]
async fn ideas_filter_applies_to_new_ideas() {
    let (client, _) = signed_in().await;
    let cubit = IdeasCubit::new(&client);
    cubit.set_status_filter(Some(IdeaStatus::Building));
    let mut states = cubit.stream();
    states.next().await.unwrap();

    let idea_id = client.add_idea(NewIdea::new("Focus Timer")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(cubit.state().ideas.is_empty());

    client
        .update_idea(
            idea_id,
            IdeaUpdate {
                status: Some(IdeaStatus::Building),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cubit.state().ideas.len(), 1);
}

#[tokio::test]
async fn idea_details_toggle_task() {
    let (client, backend) = signed_in().await;
    let idea_id = backend.seed_idea("Focus Timer", None);
    let task_id = backend.seed_task(idea_id, "Sketch", false);
    client.fetch_initial_data().await;
    let mut cubit = IdeaDetailsCubit::new(&client, idea_id);
    assert_eq!(cubit.state().total_tasks, 1);
    assert_eq!(cubit.state().completed_tasks, 0);

    cubit.toggle_task(task_id).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cubit.state().completed_tasks, 1);

    cubit.close();
    assert!(cubit.is_closed());
}
