// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with bearer authentication and error body handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::ErrorBody;

/// HTTP client for the schedule service.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or HTTP client creation fails.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request for `path` below the base URL, with authentication headers.
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        let req = self.client.request(method, url);
        match self.config.auth.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Executes a request and maps error statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        let message = error_message(&text);
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Auth(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ if message.is_empty() => ClientError::Http(status.to_string()),
            _ => ClientError::Api(message),
        })
    }

    /// Reads a JSON body, treating `{ "error": ... }` as a failure even on success statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is an error body or does not match `T`.
    pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let text = resp.text().await?;
        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&text) {
            return Err(ClientError::Api(error));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// The message of an error body: `{ "error": "..." }`, a bare JSON string, or the raw text.
fn error_message(text: &str) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(text) {
        return error;
    }
    serde_json::from_str::<String>(text).unwrap_or_else(|_| text.trim().to_string())
}
