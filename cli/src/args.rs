// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbcoreclient::{HackathonId, HackathonStatus, IdeaId, IdeaStatus, StackCategory, TaskId};

#[derive(Debug, clap::Parser)]
#[command(name = "hackbank", about = "Your vault of brilliant ideas")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Default, PartialEq, Eq, clap::Subcommand)]
pub enum Command {
    /// Top ideas, the upcoming hackathon and recent activity
    #[default]
    Dashboard,
    /// The idea bank
    #[command(subcommand)]
    Ideas(IdeasCommand),
    /// Tasks of an idea
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Comment on an idea
    Comment { idea: IdeaId, text: String },
    #[command(subcommand)]
    Hackathons(HackathonsCommand),
    /// Tech stack of an idea
    #[command(subcommand)]
    Stack(StackCommand),
    /// Members of the team
    Team,
}

#[derive(Debug, PartialEq, Eq, clap::Subcommand)]
pub enum IdeasCommand {
    List {
        /// Only ideas with this status
        #[arg(long)]
        status: Option<IdeaStatus>,
        /// Case-insensitive text in title or description
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Can be given multiple times
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Show {
        id: IdeaId,
    },
    Delete {
        id: IdeaId,
    },
}

#[derive(Debug, PartialEq, Eq, clap::Subcommand)]
pub enum TasksCommand {
    Add { idea: IdeaId, text: String },
    Toggle { idea: IdeaId, task: TaskId },
    Delete { idea: IdeaId, task: TaskId },
}

#[derive(Debug, PartialEq, Eq, clap::Subcommand)]
pub enum HackathonsCommand {
    List,
    Add {
        name: String,
        /// `YYYY-MM-DD` or RFC 3339; defaults to now
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        prizes: Option<String>,
        #[arg(long)]
        status: Option<HackathonStatus>,
    },
    /// Link an idea to a hackathon
    Link {
        hackathon: HackathonId,
        idea: IdeaId,
    },
    Delete {
        id: HackathonId,
    },
}

#[derive(Debug, PartialEq, Eq, clap::Subcommand)]
pub enum StackCommand {
    /// Add a technology to a category, or remove it if already chosen
    Toggle {
        idea: IdeaId,
        /// frontend, backend, infra or apis
        category: StackCategory,
        item: String,
    },
}
