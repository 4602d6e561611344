// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Client for the hosted data service
//!
//! The service exposes relational tables over a REST interface (`/rest/v1`) and password/web3
//! authentication (`/auth/v1`).

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::auth_api::Session;

pub mod auth_api;
mod metadata;
pub mod rest_api;
pub mod rows;
pub(crate) mod util;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");
const CLIENT_INFO_HEADER: HeaderName = HeaderName::from_static("x-client-info");

/// Errors that can occur when creating an API client.
#[derive(Error, Debug)]
pub enum ApiClientInitError {
    #[error("Failed to parse URL {0}")]
    UrlParsingError(String),
    #[error("Invalid URL {0}")]
    InvalidUrl(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

/// ApiClient is a thin wrapper around an HTTP client.
///
/// It exposes a single function for each API endpoint. The session obtained by signing in is
/// kept inside the client and attached to all subsequent requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    rest_url: Url,
    auth_url: Url,
    session: RwLock<Option<Session>>,
}

impl ApiClient {
    /// Creates a client for the service at `url` authenticating the project with `anon_key`.
    pub fn with_endpoint(url: &Url, anon_key: &SecretString) -> Result<Self, ApiClientInitError> {
        info!(%url, "Creating data service client");
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiClientInitError::InvalidUrl(url.to_string()));
        }

        let rest_url = join_base(url, "rest/v1/")?;
        let auth_url = join_base(url, "auth/v1/")?;

        let mut api_key = HeaderValue::from_str(anon_key.expose_secret())
            .map_err(|_| ApiClientInitError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(
            CLIENT_INFO_HEADER,
            HeaderValue::from_static(metadata::CLIENT_INFO),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                rest_url,
                auth_url,
                session: RwLock::new(None),
            }),
        })
    }

    pub fn with_url_str(url: &str, anon_key: &SecretString) -> Result<Self, ApiClientInitError> {
        let url: Url = url
            .parse()
            .map_err(|_| ApiClientInitError::UrlParsingError(url.to_owned()))?;
        Self::with_endpoint(&url, anon_key)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn rest_url(&self, table: &str) -> Url {
        // Table names are static identifiers, joining them can't fail.
        self.inner
            .rest_url
            .join(table)
            .unwrap_or_else(|_| self.inner.rest_url.clone())
    }

    pub(crate) fn auth_url(&self, endpoint: &str) -> Url {
        self.inner
            .auth_url
            .join(endpoint)
            .unwrap_or_else(|_| self.inner.auth_url.clone())
    }

    /// Value of the `Authorization` header for the current session, if any.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .as_ref()
            .map(|session| format!("Bearer {}", session.access_token.expose_secret()))
    }

    /// Adds the session's bearer token to the request if signed in.
    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(bearer) => request.header(reqwest::header::AUTHORIZATION, bearer),
            None => request,
        }
    }

    pub(crate) fn session_lock(&self) -> &RwLock<Option<Session>> {
        &self.inner.session
    }
}

fn join_base(url: &Url, path: &str) -> Result<Url, ApiClientInitError> {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(path)
        .map_err(|_| ApiClientInitError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn anon_key() -> SecretString {
        SecretString::from("anon-key".to_owned())
    }

    #[test]
    fn endpoints_are_joined_below_the_base_path() {
        let url: Url = "https://example.supabase.co/project".parse().unwrap();
        let client = ApiClient::with_endpoint(&url, &anon_key()).unwrap();
        assert_eq!(
            client.rest_url("ideas").as_str(),
            "https://example.supabase.co/project/rest/v1/ideas"
        );
        assert_eq!(
            client.auth_url("token").as_str(),
            "https://example.supabase.co/project/auth/v1/token"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        let error = ApiClient::with_url_str("ftp://example.com", &anon_key()).unwrap_err();
        assert!(matches!(error, ApiClientInitError::InvalidUrl(_)));
        let error = ApiClient::with_url_str("not a url", &anon_key()).unwrap_err();
        assert!(matches!(error, ApiClientInitError::UrlParsingError(_)));
    }

    #[test]
    fn no_bearer_without_session() {
        let client = ApiClient::with_url_str("http://localhost:54321", &anon_key()).unwrap();
        assert_eq!(client.bearer(), None);
    }
}
