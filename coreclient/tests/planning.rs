// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::rows::tables;
use hbcoreclient::{PrdListField, PrdUpdate, StackCategory, StackUpdate, Toast};

mod common;

use common::{signed_in, toasts};

#[tokio::test]
async fn prd_is_created_and_merged() {
    let (client, backend, _) = signed_in().await;
    let idea_id = backend.seed_idea("Planned", None);
    client.fetch_initial_data().await;
    assert!(client.prd(idea_id).is_none());

    client
        .update_prd(
            idea_id,
            PrdUpdate {
                overview: Some("A timer".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    client
        .update_prd(
            idea_id,
            PrdUpdate::with_list(PrdListField::Risks, vec!["Scope creep".to_owned()]),
        )
        .await
        .unwrap();

    let prd = client.prd(idea_id).unwrap();
    assert_eq!(prd.overview, "A timer");
    assert_eq!(prd.list(PrdListField::Risks), ["Scope creep"]);
    let row = backend.prd_row(idea_id).unwrap();
    assert_eq!(row.overview.as_deref(), Some("A timer"));
    assert_eq!(row.risks, Some(vec!["Scope creep".to_owned()]));
}

#[tokio::test]
async fn rejected_prd_change_is_rolled_back() {
    let (client, backend, _) = signed_in().await;
    let idea_id = backend.seed_idea("Planned", None);
    client.fetch_initial_data().await;
    backend.control().fail_writes_to(tables::PRDS);
    let mut notifications = client.subscribe();

    let result = client
        .update_prd(
            idea_id,
            PrdUpdate {
                goals: Some("Win".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_err());
    assert!(client.prd(idea_id).is_none());
    assert_eq!(
        toasts(&mut notifications).await,
        [Toast::error("Failed to save PRD changes")]
    );
}

#[tokio::test]
async fn stack_items_toggle() {
    let (client, backend, _) = signed_in().await;
    let idea_id = backend.seed_idea("Stacked", None);
    client.fetch_initial_data().await;

    client
        .toggle_stack_item(idea_id, StackCategory::Backend, "Rust")
        .await
        .unwrap();
    client
        .toggle_stack_item(idea_id, StackCategory::Backend, "Go")
        .await
        .unwrap();
    assert_eq!(
        client.stack(idea_id).unwrap().items(StackCategory::Backend),
        ["Rust", "Go"]
    );

    client
        .toggle_stack_item(idea_id, StackCategory::Backend, "Rust")
        .await
        .unwrap();
    assert_eq!(
        client.stack(idea_id).unwrap().items(StackCategory::Backend),
        ["Go"]
    );
    assert_eq!(
        backend.stack_row(idea_id).unwrap().backend,
        Some(vec!["Go".to_owned()])
    );
}

#[tokio::test]
async fn rejected_stack_change_is_rolled_back() {
    let (client, backend, _) = signed_in().await;
    let idea_id = backend.seed_idea("Stacked", None);
    client.fetch_initial_data().await;
    client
        .update_stack(
            idea_id,
            StackUpdate {
                notes: Some("Keep it simple".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    backend.control().fail_writes_to(tables::TECH_STACKS);

    let result = client
        .toggle_stack_item(idea_id, StackCategory::Infra, "Docker")
        .await;

    assert!(result.is_err());
    let stack = client.stack(idea_id).unwrap();
    assert!(stack.items(StackCategory::Infra).is_empty());
    assert_eq!(stack.notes, "Keep it simple");
}
