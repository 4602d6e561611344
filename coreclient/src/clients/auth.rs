// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use hbapiclient::{
    auth_api::{Web3Chain, Web3Credentials},
    rows::NewProfileRow,
};
use hbcommon::{status::MemberRole, utils::non_blank};
use secrecy::SecretString;
use tracing::{error, info, warn};

use crate::{members::Member, service::DataService, store::StoreEntityId};

use super::{CoreClient, StoreError};

/// Statement shown by the wallet when signing in.
pub(crate) const WEB3_STATEMENT: &str = "Sign in to HackBank - Your vault of brilliant ideas!";

const FALLBACK_PROFILE_NAME: &str = "User";

/// A message signed by a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// The full message presented to the wallet, including the statement.
    pub message: String,
    pub signature: String,
}

/// Access to a browser or hardware wallet used to sign in.
pub trait WalletSigner: Send + Sync {
    /// Whether a wallet for `chain` is installed.
    fn is_available(&self, chain: Web3Chain) -> bool;

    /// Asks the wallet to sign a sign-in message containing `statement`.
    fn sign_statement(
        &self,
        chain: Web3Chain,
        statement: &str,
    ) -> impl Future<Output = anyhow::Result<SignedMessage>> + Send;
}

fn missing_wallet_message(chain: Web3Chain) -> &'static str {
    match chain {
        Web3Chain::Ethereum => "Please install MetaMask or another Ethereum wallet",
        Web3Chain::Solana => "Please install Phantom or another Solana wallet",
    }
}

impl<S: DataService> CoreClient<S> {
    /// Restores the session established before, if any, and loads the data of its user.
    ///
    /// `auth_ready` is set once done, whether a session existed or not.
    pub async fn init_auth(&self) {
        self.with_state_and_notifier(|state, notifier| {
            state.auth_ready = false;
            notifier.update(StoreEntityId::User);
        });

        if self.service().has_session() {
            let profile = self.fetch_current_profile().await;
            self.with_state_and_notifier(|state, notifier| {
                state.user = profile;
                notifier.update(StoreEntityId::User);
            });
            self.fetch_initial_data().await;
        }

        self.with_state_and_notifier(|state, notifier| {
            state.auth_ready = true;
            notifier.update(StoreEntityId::User);
        });
    }

    /// Signs in with email and password.
    ///
    /// Rejected credentials are returned without changing the state.
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<(), StoreError> {
        self.service()
            .sign_in_with_password(email, password)
            .await?;
        self.complete_sign_in("Welcome back!").await;
        Ok(())
    }

    /// Creates an account and its profile, then loads the data like [`Self::sign_in`].
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
    ) -> Result<(), StoreError> {
        let response = self.service().sign_up(email, password).await?;
        let user = response.user.ok_or(StoreError::SignUpFailed)?;

        let profile = NewProfileRow {
            id: user.id,
            name: name.trim().to_owned(),
            role: MemberRole::default(),
            avatar_url: None,
        };
        self.service().insert_profile(&profile).await?;
        info!(user_id = %user.id, "Account created");

        self.complete_sign_in("Account created!").await;
        Ok(())
    }

    /// Signs in with a message signed by a wallet.
    ///
    /// Without an installed wallet, the user is told to install one and `Ok` is returned.
    pub async fn sign_in_with_web3(
        &self,
        chain: Web3Chain,
        signer: &impl WalletSigner,
    ) -> Result<(), StoreError> {
        if !signer.is_available(chain) {
            warn!(%chain, "No wallet available");
            self.toast(|notifier| {
                notifier.error(missing_wallet_message(chain));
            });
            return Ok(());
        }

        let signed = signer
            .sign_statement(chain, WEB3_STATEMENT)
            .await
            .map_err(StoreError::Wallet)?;
        let credentials = Web3Credentials {
            chain,
            message: signed.message,
            signature: signed.signature,
        };
        self.service().sign_in_with_web3(&credentials).await?;

        self.complete_sign_in(format!("Connected with {chain}!"))
            .await;
        Ok(())
    }

    /// Ends the session and drops all loaded data.
    ///
    /// A failure to end the session remotely is only logged.
    pub async fn sign_out(&self) {
        if let Err(error) = self.service().sign_out().await {
            warn!(%error, "Failed to sign out remotely");
        }
        self.with_state_and_notifier(|state, notifier| {
            for idea in &state.ideas {
                notifier
                    .remove(idea.id)
                    .remove(StoreEntityId::Prd(idea.id))
                    .remove(StoreEntityId::Stack(idea.id));
            }
            for hackathon in &state.hackathons {
                notifier.remove(hackathon.id);
            }
            state.clear();
            notifier
                .update(StoreEntityId::User)
                .update(StoreEntityId::Members)
                .update(StoreEntityId::Activities)
                .success("Signed out");
        });
    }

    /// The profile of the signed-in user.
    ///
    /// Creates a profile from the account metadata if the user has none yet. Failures are logged
    /// and yield `None`.
    pub async fn fetch_current_profile(&self) -> Option<Member> {
        let user = match self.service().auth_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "Failed to fetch the current user");
                return None;
            }
        };

        match self.service().profile(user.id).await {
            Ok(Some(profile)) => return Some(profile.into()),
            Ok(None) => (),
            Err(error) => {
                error!(%error, "Failed to fetch profile");
                return None;
            }
        }

        let name = user
            .user_metadata
            .name
            .as_deref()
            .and_then(non_blank)
            .or_else(|| user.email.as_deref().and_then(non_blank))
            .unwrap_or(FALLBACK_PROFILE_NAME)
            .to_owned();
        let profile = NewProfileRow {
            id: user.id,
            name,
            role: MemberRole::Frontend,
            avatar_url: user.user_metadata.avatar_url.clone(),
        };
        info!(user_id = %user.id, "Creating missing profile");
        self.service()
            .insert_profile(&profile)
            .await
            .inspect_err(|error| error!(%error, "Failed to create profile"))
            .ok()
            .map(Member::from)
    }

    async fn complete_sign_in(&self, message: impl Into<String>) {
        let profile = self.fetch_current_profile().await;
        self.with_state_and_notifier(|state, notifier| {
            state.user = profile;
            state.auth_ready = true;
            notifier.update(StoreEntityId::User);
        });
        self.fetch_initial_data().await;
        self.toast(|notifier| {
            notifier.success(message);
        });
    }
}
