// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! API client implementation for the auth service

use chrono::{DateTime, Utc};
use hbcommon::identifiers::UserId;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{ApiClient, util::check_status};

#[derive(Debug, thiserror::Error)]
pub enum AuthRequestError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Auth service rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl From<(StatusCode, String)> for AuthRequestError {
    fn from((status, message): (StatusCode, String)) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return Self::NotSignedIn;
        }
        Self::Rejected { status, message }
    }
}

/// A user known to the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Free-form metadata attached to the user on sign up or by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// An authenticated session.
#[derive(Debug)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

#[derive(Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl From<SessionBody> for Session {
    fn from(body: SessionBody) -> Self {
        Self {
            access_token: SecretString::from(body.access_token),
            refresh_token: body.refresh_token.map(SecretString::from),
            expires_at: body
                .expires_at
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            user: body.user,
        }
    }
}

/// Response to a sign up request.
///
/// When email confirmation is enabled, the service returns the created user without a session.
#[derive(Debug)]
pub struct SignUpResponse {
    pub user: Option<AuthUser>,
    pub signed_in: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(AuthUser),
    Empty {},
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Blockchain used to sign in with a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Web3Chain {
    Ethereum,
    Solana,
}

/// A message signed by a wallet, exchanged for a session.
#[derive(Debug, Clone, Serialize)]
pub struct Web3Credentials {
    pub chain: Web3Chain,
    pub message: String,
    pub signature: String,
}

impl std::fmt::Display for Web3Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ethereum => "Ethereum",
            Self::Solana => "Solana",
        })
    }
}

impl ApiClient {
    /// Signs in with email and password and stores the session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthUser, AuthRequestError> {
        let credentials = PasswordCredentials {
            email,
            password: password.expose_secret(),
        };
        let response = self
            .http()
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&credentials)
            .send()
            .await?;
        let body: SessionBody = check_status(response).await?.json().await?;
        Ok(self.store_session(body.into()))
    }

    /// Signs in with a message signed by a wallet and stores the session.
    pub async fn sign_in_with_web3(
        &self,
        credentials: &Web3Credentials,
    ) -> Result<AuthUser, AuthRequestError> {
        let response = self
            .http()
            .post(self.auth_url("token"))
            .query(&[("grant_type", "web3")])
            .json(credentials)
            .send()
            .await?;
        let body: SessionBody = check_status(response).await?.json().await?;
        Ok(self.store_session(body.into()))
    }

    /// Registers a new account.
    ///
    /// If the service signs the user in immediately, the session is stored.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignUpResponse, AuthRequestError> {
        let credentials = PasswordCredentials {
            email,
            password: password.expose_secret(),
        };
        let response = self
            .http()
            .post(self.auth_url("signup"))
            .json(&credentials)
            .send()
            .await?;
        let body: SignUpBody = check_status(response).await?.json().await?;
        Ok(match body {
            SignUpBody::Session(session) => SignUpResponse {
                user: Some(self.store_session(session.into())),
                signed_in: true,
            },
            SignUpBody::User(user) => SignUpResponse {
                user: Some(user),
                signed_in: false,
            },
            SignUpBody::Empty {} => SignUpResponse {
                user: None,
                signed_in: false,
            },
        })
    }

    /// Fetches the user of the current session.
    pub async fn get_user(&self) -> Result<AuthUser, AuthRequestError> {
        if self.bearer().is_none() {
            return Err(AuthRequestError::NotSignedIn);
        }
        let request = self.http().get(self.auth_url("user"));
        let response = self.authorize(request).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Ends the current session.
    ///
    /// The local session is dropped even if the service fails to revoke it.
    pub async fn sign_out(&self) -> Result<(), AuthRequestError> {
        let Some(bearer) = self.bearer() else {
            return Ok(());
        };
        self.session_lock().write().take();
        let response = self
            .http()
            .post(self.auth_url("logout"))
            .header(reqwest::header::AUTHORIZATION, bearer)
            .send()
            .await?;
        if let Err(error) = check_status(response).await {
            warn!(status = %error.0, message = %error.1, "Failed to revoke session");
            return Err(error.into());
        }
        info!("Signed out");
        Ok(())
    }

    /// The user of the current session, if signed in.
    pub fn session_user(&self) -> Option<AuthUser> {
        self.session_lock()
            .read()
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// Replaces the current session, e.g. with one restored from disk.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session_lock().write() = session;
    }

    fn store_session(&self, session: Session) -> AuthUser {
        let user = session.user.clone();
        info!(user_id = %user.id, "Signed in");
        *self.session_lock().write() = Some(session);
        user
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::*;

    const USER_ID: &str = "00000000-0000-0000-0000-000000000007";

    fn session_json() -> String {
        format!(
            r#"{{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1767225600,
                "refresh_token": "refresh",
                "user": {{
                    "id": "{USER_ID}",
                    "email": "ada@example.com",
                    "user_metadata": {{ "name": "Ada" }}
                }}
            }}"#
        )
    }

    fn client(server: &mockito::Server) -> ApiClient {
        ApiClient::with_url_str(&server.url(), &SecretString::from("anon".to_owned())).unwrap()
    }

    #[tokio::test]
    async fn sign_in_stores_session() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "password".into(),
            ))
            .match_header("apikey", "anon")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "email": "ada@example.com",
                "password": "secret",
            })))
            .with_status(200)
            .with_body(session_json())
            .create_async()
            .await;
        let user = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer jwt")
            .with_status(200)
            .with_body(format!(r#"{{"id": "{USER_ID}", "email": "ada@example.com"}}"#))
            .create_async()
            .await;

        let client = client(&server);
        let signed_in = client
            .sign_in_with_password("ada@example.com", &SecretString::from("secret".to_owned()))
            .await
            .unwrap();
        assert_eq!(signed_in.id, UserId::new(Uuid::from_u128(7)));
        assert_eq!(signed_in.user_metadata.name.as_deref(), Some("Ada"));
        assert_eq!(client.session_user(), Some(signed_in));

        let fetched = client.get_user().await.unwrap();
        assert_eq!(fetched.email.as_deref(), Some("ada@example.com"));
        assert_eq!(fetched.user_metadata, UserMetadata::default());

        token.assert_async().await;
        user.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
            .create_async()
            .await;

        let client = client(&server);
        let error = client
            .sign_in_with_password("ada@example.com", &SecretString::from("wrong".to_owned()))
            .await
            .unwrap_err();
        match error {
            AuthRequestError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(client.session_user(), None);
    }

    #[tokio::test]
    async fn sign_up_without_confirmation_returns_user_only() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(format!(r#"{{"id": "{USER_ID}", "email": "ada@example.com"}}"#))
            .create_async()
            .await;

        let client = client(&server);
        let response = client
            .sign_up("ada@example.com", &SecretString::from("secret".to_owned()))
            .await
            .unwrap();
        assert!(!response.signed_in);
        assert_eq!(response.user.unwrap().id, UserId::new(Uuid::from_u128(7)));
        assert_eq!(client.session_user(), None);
    }

    #[tokio::test]
    async fn get_user_requires_session() {
        let server = mockito::Server::new_async().await;
        let client = client(&server);
        assert!(matches!(
            client.get_user().await,
            Err(AuthRequestError::NotSignedIn)
        ));
        // Without a session, signing out is a local no-op.
        client.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn sign_out_drops_session_even_on_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(session_json())
            .create_async()
            .await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(500)
            .create_async()
            .await;

        let client = client(&server);
        client
            .sign_in_with_password("ada@example.com", &SecretString::from("secret".to_owned()))
            .await
            .unwrap();
        assert!(client.sign_out().await.is_err());
        assert_eq!(client.session_user(), None);
    }
}
