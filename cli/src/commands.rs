// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{io::Write, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use futures_util::FutureExt;
use hbapplogic::api::{
    dashboard_cubit::{DashboardState, time_left},
    ideas_cubit::IdeaFilter,
};
use hbcoreclient::{
    CoreClient, DataService, Idea, NewHackathon, NewIdea, StoreNotification, TechStack, Toast,
    ToastKind,
};
use tokio_stream::{Stream, StreamExt};

use crate::args::{Command, HackathonsCommand, IdeasCommand, StackCommand, TasksCommand};

/// Runs `command` as the signed-in user and writes its output to `out`.
pub async fn run<D: DataService>(
    client: &CoreClient<D>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Dashboard => {
            let state = DashboardState::new(
                client.ideas(),
                &client.hackathons(),
                client.activities(),
                Utc::now(),
            );
            print_dashboard(&state, out)?;
        }
        Command::Ideas(command) => run_ideas(client, command, out).await?,
        Command::Tasks(command) => match command {
            TasksCommand::Add { idea, text } => client.add_task(idea, &text).await?,
            TasksCommand::Toggle { idea, task } => client.toggle_task(idea, task).await?,
            TasksCommand::Delete { idea, task } => client.delete_task(idea, task).await?,
        },
        Command::Comment { idea, text } => client.add_comment(idea, &text).await?,
        Command::Hackathons(command) => run_hackathons(client, command, out).await?,
        Command::Stack(StackCommand::Toggle {
            idea,
            category,
            item,
        }) => {
            client.toggle_stack_item(idea, category, &item).await?;
            let stack = client
                .stack(idea)
                .unwrap_or_else(|| TechStack::empty(idea));
            writeln!(out, "{category}: {}", stack.items(category).join(", "))?;
        }
        Command::Team => {
            for member in client.members() {
                writeln!(out, "{:<24} {}", member.name, member.role)?;
            }
        }
    }
    Ok(())
}

async fn run_ideas<D: DataService>(
    client: &CoreClient<D>,
    command: IdeasCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        IdeasCommand::List { status, search } => {
            let filter = IdeaFilter {
                search: search.unwrap_or_default(),
                status,
            };
            for idea in client.ideas().iter().filter(|idea| filter.matches(idea)) {
                print_idea_line(idea, out)?;
            }
        }
        IdeasCommand::Add {
            title,
            description,
            tags,
        } => {
            let new_idea = NewIdea {
                description: description.unwrap_or_default(),
                tags: (!tags.is_empty()).then_some(tags),
                ..NewIdea::new(title)
            };
            let idea_id = client.add_idea(new_idea).await?;
            writeln!(out, "{idea_id}")?;
        }
        IdeasCommand::Show { id } => {
            let idea = client.idea(id).with_context(|| format!("No idea with id {id}"))?;
            print_idea(&idea, client.prd(id).is_some(), out)?;
        }
        IdeasCommand::Delete { id } => client.delete_idea(id).await?,
    }
    Ok(())
}

async fn run_hackathons<D: DataService>(
    client: &CoreClient<D>,
    command: HackathonsCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        HackathonsCommand::List => {
            let now = Utc::now();
            for hackathon in client.hackathons() {
                writeln!(
                    out,
                    "{}  {:<9} {}  {} ({}), {} ideas",
                    hackathon.id,
                    hackathon.status,
                    hackathon.name,
                    hackathon.deadline.format("%Y-%m-%d"),
                    time_left(hackathon.deadline, now),
                    hackathon.linked_idea_ids.len(),
                )?;
            }
        }
        HackathonsCommand::Add {
            name,
            deadline,
            theme,
            prizes,
            status,
        } => {
            let new_hackathon = NewHackathon {
                deadline,
                theme,
                prizes,
                status,
                ..NewHackathon::new(name)
            };
            let hackathon_id = client.add_hackathon(new_hackathon).await?;
            writeln!(out, "{hackathon_id}")?;
        }
        HackathonsCommand::Link { hackathon, idea } => {
            client.link_idea_to_hackathon(hackathon, idea).await?;
        }
        HackathonsCommand::Delete { id } => client.delete_hackathon(id).await?,
    }
    Ok(())
}

fn print_dashboard(state: &DashboardState, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(upcoming) = &state.upcoming_hackathon {
        writeln!(
            out,
            "Upcoming: {} ({}) - {}",
            upcoming.hackathon.name, upcoming.hackathon.status, upcoming.time_left
        )?;
        writeln!(out)?;
    }
    writeln!(out, "Top progress")?;
    for idea in &state.featured_ideas {
        print_idea_line(idea, out)?;
    }
    writeln!(out)?;
    writeln!(out, "Recent activity")?;
    for activity in &state.recent_activity {
        writeln!(
            out,
            "{} {} {} {}",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.user_name,
            activity.action,
            activity.target
        )?;
    }
    Ok(())
}

fn print_idea_line(idea: &Idea, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}  {:<9} {:>3}%  {}",
        idea.id, idea.status, idea.progress, idea.title
    )?;
    Ok(())
}

fn print_idea(idea: &Idea, has_prd: bool, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", idea.title)?;
    writeln!(
        out,
        "Status: {}  Level: {}  Progress: {}%",
        idea.status, idea.level, idea.progress
    )?;
    if !idea.tags.is_empty() {
        writeln!(out, "Tags: {}", idea.tags.join(", "))?;
    }
    writeln!(out, "PRD: {}", if has_prd { "yes" } else { "no" })?;
    writeln!(out)?;
    writeln!(out, "{}", idea.description)?;
    let sections = [
        ("Problem", &idea.sections.problem),
        ("Solution", &idea.sections.solution),
        ("Target users", &idea.sections.target_users),
        ("Value proposition", &idea.sections.value_prop),
    ];
    for (heading, text) in sections.into_iter().filter(|(_, text)| !text.is_empty()) {
        writeln!(out, "{heading}: {text}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Tasks ({}/{})",
        idea.completed_tasks(),
        idea.tasks.len()
    )?;
    for task in &idea.tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}  {}", task.id, task.text)?;
    }
    if !idea.comments.is_empty() {
        writeln!(out)?;
        writeln!(out, "Comments")?;
        for comment in &idea.comments {
            writeln!(out, "{}: {}", comment.user_name, comment.text)?;
        }
    }
    Ok(())
}

/// The toasts published so far, without waiting for more.
pub fn pending_toasts(
    notifications: &mut (impl Stream<Item = Arc<StoreNotification>> + Unpin),
) -> Vec<Toast> {
    let mut toasts = Vec::new();
    while let Some(Some(notification)) = notifications.next().now_or_never() {
        toasts.extend(notification.toasts.iter().cloned());
    }
    toasts
}

pub fn print_toasts(toasts: &[Toast], out: &mut impl Write) -> anyhow::Result<()> {
    for toast in toasts {
        let prefix = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        writeln!(out, "{prefix}: {}", toast.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use hbcoreclient::{IdeaStatus, StackCategory};
    use hbtest_harness::{InMemoryBackend, init_test_tracing};
    use secrecy::SecretString;

    use super::*;

    async fn signed_in() -> (CoreClient<InMemoryBackend>, InMemoryBackend) {
        init_test_tracing();
        let backend = InMemoryBackend::new();
        let user_id = backend.add_account("ada@example.com", "pw", Some("Ada"));
        backend.seed_profile(user_id, "Ada", Some("Lead"));
        let client = CoreClient::new(backend.clone());
        client
            .sign_in("ada@example.com", &SecretString::from("pw".to_owned()))
            .await
            .unwrap();
        (client, backend)
    }

    async fn output(client: &CoreClient<InMemoryBackend>, command: Command) -> String {
        let mut out = Vec::new();
        run(client, command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn add_and_list_ideas() {
        let (client, _) = signed_in().await;
        let mut notifications = client.subscribe();

        let id = output(
            &client,
            Command::Ideas(IdeasCommand::Add {
                title: "Focus Timer".to_owned(),
                description: None,
                tags: vec!["productivity".to_owned()],
            }),
        )
        .await;
        assert_eq!(
            pending_toasts(&mut notifications),
            [Toast::success("Idea created!")]
        );

        let listed = output(
            &client,
            Command::Ideas(IdeasCommand::List {
                status: None,
                search: Some("TIMER".to_owned()),
            }),
        )
        .await;
        assert!(listed.starts_with(id.trim()));
        assert!(listed.contains("Focus Timer"));

        let building = output(
            &client,
            Command::Ideas(IdeasCommand::List {
                status: Some(IdeaStatus::Building),
                search: None,
            }),
        )
        .await;
        assert!(building.is_empty());
    }

    #[tokio::test]
    async fn show_idea_with_tasks() {
        let (client, backend) = signed_in().await;
        let idea_id = backend.seed_idea("Focus Timer", None);
        backend.seed_task(idea_id, "Sketch", true);
        backend.seed_task(idea_id, "Build", false);
        client.fetch_initial_data().await;

        let shown = output(&client, Command::Ideas(IdeasCommand::Show { id: idea_id })).await;

        assert!(shown.starts_with("Focus Timer\n"));
        assert!(shown.contains("Tasks (1/2)"));
        assert!(shown.lines().any(|line| line.starts_with("[x]") && line.ends_with("Sketch")));
        assert!(shown.lines().any(|line| line.starts_with("[ ]") && line.ends_with("Build")));
    }

    #[tokio::test]
    async fn show_unknown_idea_fails() {
        let (client, _) = signed_in().await;
        let mut out = Vec::new();
        let id = hbcoreclient::IdeaId::random();
        let error = run(&client, Command::Ideas(IdeasCommand::Show { id }), &mut out)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), format!("No idea with id {id}"));
    }

    #[tokio::test]
    async fn stack_toggle_prints_category() {
        let (client, backend) = signed_in().await;
        let idea_id = backend.seed_idea("Focus Timer", None);
        client.fetch_initial_data().await;

        let printed = output(
            &client,
            Command::Stack(StackCommand::Toggle {
                idea: idea_id,
                category: StackCategory::Backend,
                item: "Rust".to_owned(),
            }),
        )
        .await;

        assert_eq!(printed, "backend: Rust\n");
    }

    #[tokio::test]
    async fn team_and_dashboard() {
        let (client, backend) = signed_in().await;
        backend.seed_hackathon("Spring Jam");
        client.fetch_initial_data().await;

        let team = output(&client, Command::Team).await;
        assert!(team.starts_with("Ada"));
        assert!(team.trim_end().ends_with("Lead"));

        let dashboard = output(&client, Command::Dashboard).await;
        assert!(dashboard.starts_with("Upcoming: Spring Jam (Planned) - Ended"));
        assert!(dashboard.contains("Top progress"));
    }

    #[test]
    fn toasts_are_prefixed() {
        let mut out = Vec::new();
        print_toasts(
            &[Toast::success("Idea created!"), Toast::error("Failed to save task")],
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ok: Idea created!\nerror: Failed to save task\n"
        );
    }
}
