// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::rows::tables;
use hbcommon::assert_matches;
use hbcoreclient::{
    HackathonStatus, HackathonUpdate, NewHackathon, StoreEntityId, StoreError, Toast,
};

mod common;

use common::{drain, signed_in, toasts};

#[tokio::test]
async fn add_hackathon_with_date_deadline() {
    let (client, backend, _) = signed_in().await;
    let mut notifications = client.subscribe();

    let hackathon_id = client
        .add_hackathon(NewHackathon {
            deadline: Some("2026-11-30".to_owned()),
            theme: Some("  Climate ".to_owned()),
            status: Some(HackathonStatus::Active),
            ..NewHackathon::new("Winter Jam")
        })
        .await
        .unwrap();

    let hackathon = client.hackathon(hackathon_id).unwrap();
    assert_eq!(hackathon.name, "Winter Jam");
    assert_eq!(hackathon.theme, "Climate");
    assert_eq!(hackathon.status, HackathonStatus::Active);
    assert_eq!(hackathon.deadline.to_rfc3339(), "2026-11-30T00:00:00+00:00");
    assert_eq!(client.hackathons()[0].id, hackathon_id);
    assert!(backend.hackathon_row(hackathon_id).is_some());
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::success("Hackathon added!")]
    );
}

#[tokio::test]
async fn blank_hackathon_name_is_rejected_locally() {
    let (client, backend, _) = signed_in().await;

    let result = client.add_hackathon(NewHackathon::new(" ")).await;

    assert_matches!(result, Err(StoreError::Validation(_)));
    assert!(backend.write_log().is_empty());
}

#[tokio::test]
async fn link_moves_idea_between_hackathons() {
    let (client, backend, _) = signed_in().await;
    let spring = backend.seed_hackathon("Spring");
    let autumn = backend.seed_hackathon("Autumn");
    let idea_id = backend.seed_idea("Traveller", Some(spring));
    client.fetch_initial_data().await;
    let mut notifications = client.subscribe();

    client.link_idea_to_hackathon(autumn, idea_id).await.unwrap();

    assert!(!client.hackathon(spring).unwrap().is_linked(idea_id));
    assert!(client.hackathon(autumn).unwrap().is_linked(idea_id));
    assert_eq!(client.idea(idea_id).unwrap().hackathon_id, Some(autumn));
    assert_eq!(backend.idea_row(idea_id).unwrap().hackathon_id, Some(autumn));
    let notifications = drain(&mut notifications).await;
    assert!(notifications[0].any(|id| *id == StoreEntityId::Hackathon(spring)));
    assert!(notifications[0].any(|id| *id == StoreEntityId::Hackathon(autumn)));
    assert_eq!(
        notifications.last().unwrap().toasts,
        [Toast::success("Linked to hackathon!")]
    );
}

#[tokio::test]
async fn rejected_link_is_rolled_back() {
    let (client, backend, _) = signed_in().await;
    let hackathon_id = backend.seed_hackathon("Spring");
    let idea_id = backend.seed_idea("Loner", None);
    client.fetch_initial_data().await;
    backend.control().fail_writes_to(tables::IDEAS);

    let result = client.link_idea_to_hackathon(hackathon_id, idea_id).await;

    assert_matches!(result, Err(StoreError::Backend(_)));
    assert_eq!(client.idea(idea_id).unwrap().hackathon_id, None);
    assert!(client.hackathon(hackathon_id).unwrap().linked_idea_ids.is_empty());
}

#[tokio::test]
async fn update_hackathon_and_roll_back() {
    let (client, backend, _) = signed_in().await;
    let hackathon_id = backend.seed_hackathon("Spring");
    client.fetch_initial_data().await;

    client
        .update_hackathon(
            hackathon_id,
            HackathonUpdate {
                status: Some(HackathonStatus::Submitted),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        backend.hackathon_row(hackathon_id).unwrap().status.as_deref(),
        Some("Submitted")
    );

    backend.control().fail_writes_to(tables::HACKATHONS);
    let mut notifications = client.subscribe();
    let result = client
        .update_hackathon(
            hackathon_id,
            HackathonUpdate {
                name: Some("Renamed".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(StoreError::Backend(_)));
    let hackathon = client.hackathon(hackathon_id).unwrap();
    assert_eq!(hackathon.name, "Spring");
    assert_eq!(hackathon.status, HackathonStatus::Submitted);
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::error("Failed to update hackathon")]
    );
}

#[tokio::test]
async fn rejected_hackathon_insert_adds_nothing() {
    let (client, backend, _) = signed_in().await;
    backend.control().fail_writes_to(tables::HACKATHONS);
    let mut notifications = client.subscribe();

    let result = client.add_hackathon(NewHackathon::new("Doomed Jam")).await;

    assert_matches!(result, Err(StoreError::Backend(_)));
    assert!(client.hackathons().is_empty());
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::error("Failed to add hackathon")]
    );
}

#[tokio::test]
async fn delete_hackathon_unlinks_ideas() {
    let (client, backend, _) = signed_in().await;
    let hackathon_id = backend.seed_hackathon("Spring");
    let linked = backend.seed_idea("Linked", Some(hackathon_id));
    let other = backend.seed_idea("Other", None);
    client.fetch_initial_data().await;
    let mut notifications = client.subscribe();

    client.delete_hackathon(hackathon_id).await.unwrap();

    assert!(client.hackathon(hackathon_id).is_none());
    assert_eq!(client.idea(linked).unwrap().hackathon_id, None);
    assert_eq!(backend.idea_row(linked).unwrap().hackathon_id, None);
    assert!(backend.hackathon_row(hackathon_id).is_none());
    assert!(client.idea(other).is_some());
    let log = backend.write_log();
    assert!(log.contains(&"unlink ideas".to_owned()));
    assert!(log.contains(&"delete hackathons".to_owned()));
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::success("Hackathon deleted")]
    );
}

#[tokio::test]
async fn delete_unlinked_hackathon_skips_unlink() {
    let (client, backend, _) = signed_in().await;
    let hackathon_id = backend.seed_hackathon("Empty");
    client.fetch_initial_data().await;

    client.delete_hackathon(hackathon_id).await.unwrap();

    assert_eq!(backend.write_log(), ["delete hackathons"]);
}

#[tokio::test]
async fn rejected_delete_restores_hackathon_and_links() {
    let (client, backend, _) = signed_in().await;
    let hackathon_id = backend.seed_hackathon("Spring");
    let linked = backend.seed_idea("Linked", Some(hackathon_id));
    client.fetch_initial_data().await;
    backend.control().fail_writes_to(tables::HACKATHONS);
    let mut notifications = client.subscribe();

    let result = client.delete_hackathon(hackathon_id).await;

    assert_matches!(result, Err(StoreError::Backend(_)));
    assert!(client.hackathon(hackathon_id).unwrap().is_linked(linked));
    assert_eq!(client.idea(linked).unwrap().hackathon_id, Some(hackathon_id));
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::error("Failed to delete hackathon")]
    );
}
