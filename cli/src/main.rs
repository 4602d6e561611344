// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::Context;
use clap::Parser;
use hbapiclient::ApiClient;
use hbcli::{
    args::Args,
    commands::{pending_toasts, print_toasts, run},
    configurations::get_configuration,
    logging::init_logging,
};
use hbcoreclient::CoreClient;
use tracing::info;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();

    let configuration = get_configuration("cli/").context("Could not load configuration")?;
    let url = Url::parse(&configuration.backend.url).context("Invalid backend url")?;
    let api_client = ApiClient::with_endpoint(&url, &configuration.backend.anon_key)?;
    let client = CoreClient::new(api_client);

    let mut notifications = client.subscribe();
    let account = &configuration.account;
    client
        .sign_in(&account.email, &account.password)
        .await
        .context("Failed to sign in")?;
    info!(email = %account.email, "Signed in");

    let command = args.cmd.unwrap_or_default();
    let result = run(&client, command, &mut std::io::stdout().lock()).await;

    print_toasts(&pending_toasts(&mut notifications), &mut std::io::stderr().lock())?;
    result
}
