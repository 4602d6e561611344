// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! API client implementation for the REST tables
//!
//! Queries use the PostgREST URL syntax: `select=<columns>`, `<column>=eq.<value>` and
//! `order=<column>.<asc|desc>`.

use std::fmt;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{ApiClient, util::check_status};

const PREFER_REPRESENTATION: &str = "return=representation";
const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, thiserror::Error)]
pub enum RestRequestError {
    #[error("Request to {table} failed ({status}): {message}")]
    Status {
        table: &'static str,
        status: StatusCode,
        message: String,
    },
    #[error("Expected a row from {0}, but the response was empty")]
    EmptyResponse(&'static str),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl RestRequestError {
    /// The HTTP status returned by the service, if the request reached it.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::EmptyResponse(_) => None,
            Self::Reqwest(error) => error.status(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// A query against a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: &'static str,
    select: Option<&'static str>,
    filters: Vec<(String, String)>,
    order: Option<(&'static str, Order)>,
}

impl Query {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            select: None,
            filters: Vec::new(),
            order: None,
        }
    }

    /// Restricts the returned columns. All columns are returned by default.
    pub fn select(mut self, columns: &'static str) -> Self {
        self.select = Some(columns);
        self
    }

    /// Keeps only the rows where `column` equals `value`.
    pub fn eq(mut self, column: &'static str, value: impl fmt::Display) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &'static str, order: Order) -> Self {
        self.order = Some((column, order));
        self
    }

    pub fn table_name(&self) -> &'static str {
        self.table
    }

    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        params.push(("select".to_owned(), self.select.unwrap_or("*").to_owned()));
        params.extend(self.filters.iter().cloned());
        if let Some((column, order)) = self.order {
            params.push(("order".to_owned(), format!("{column}.{order}")));
        }
        params
    }
}

impl ApiClient {
    fn table_request(&self, method: Method, query: &Query) -> RequestBuilder {
        let request = self
            .http()
            .request(method, self.rest_url(query.table))
            .query(&query.params());
        self.authorize(request)
    }

    async fn send_rows<R: DeserializeOwned>(
        &self,
        table: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<R>, RestRequestError> {
        let response = request.send().await?;
        let response = check_status(response)
            .await
            .map_err(|(status, message)| RestRequestError::Status {
                table,
                status,
                message,
            })?;
        let rows: Vec<R> = response.json().await?;
        debug!(table, rows = rows.len(), "Received rows");
        Ok(rows)
    }

    /// Fetches all rows matching the query.
    pub async fn select<R: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Vec<R>, RestRequestError> {
        let request = self.table_request(Method::GET, query);
        self.send_rows(query.table, request).await
    }

    /// Fetches at most one row matching the query.
    pub async fn select_maybe_single<R: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Option<R>, RestRequestError> {
        let request = self
            .table_request(Method::GET, query)
            .query(&[("limit", "1")]);
        let rows = self.send_rows(query.table, request).await?;
        Ok(rows.into_iter().next())
    }

    /// Inserts a row and returns it as stored by the service.
    pub async fn insert<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &'static str,
        body: &B,
    ) -> Result<R, RestRequestError> {
        let request = self
            .table_request(Method::POST, &Query::table(table))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body);
        let rows = self.send_rows(table, request).await?;
        rows.into_iter()
            .next()
            .ok_or(RestRequestError::EmptyResponse(table))
    }

    /// Inserts a row or merges it into the row with the same `on_conflict` column.
    pub async fn upsert<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &'static str,
        on_conflict: &'static str,
        body: &B,
    ) -> Result<R, RestRequestError> {
        let request = self
            .table_request(Method::POST, &Query::table(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", PREFER_UPSERT)
            .json(body);
        let rows = self.send_rows(table, request).await?;
        rows.into_iter()
            .next()
            .ok_or(RestRequestError::EmptyResponse(table))
    }

    /// Updates all rows matching the query and returns them.
    pub async fn update<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        query: &Query,
        body: &B,
    ) -> Result<Vec<R>, RestRequestError> {
        let request = self
            .table_request(Method::PATCH, query)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body);
        self.send_rows(query.table, request).await
    }

    /// Updates the single row matching the query and returns it.
    ///
    /// Fails with [`RestRequestError::EmptyResponse`] if no row matched.
    pub async fn update_single<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        query: &Query,
        body: &B,
    ) -> Result<R, RestRequestError> {
        self.update(query, body)
            .await?
            .into_iter()
            .next()
            .ok_or(RestRequestError::EmptyResponse(query.table))
    }

    /// Updates all rows matching the query without returning them.
    pub async fn update_minimal<B: Serialize + ?Sized>(
        &self,
        query: &Query,
        body: &B,
    ) -> Result<(), RestRequestError> {
        let response = self
            .table_request(Method::PATCH, query)
            .header("Prefer", PREFER_MINIMAL)
            .json(body)
            .send()
            .await?;
        self.expect_success(query.table, response).await
    }

    /// Deletes all rows matching the query.
    pub async fn delete(&self, query: &Query) -> Result<(), RestRequestError> {
        let response = self.table_request(Method::DELETE, query).send().await?;
        self.expect_success(query.table, response).await
    }

    async fn expect_success(
        &self,
        table: &'static str,
        response: reqwest::Response,
    ) -> Result<(), RestRequestError> {
        check_status(response)
            .await
            .map_err(|(status, message)| RestRequestError::Status {
                table,
                status,
                message,
            })?;
        Ok(())
    }
}
