// HTTP client core for the Venue Mapping AI backend.
//
// All endpoint modules (auth, venues, projects, clients) are `impl`
// blocks on `ApiClient` and go through the private verb helpers here,
// so authentication, logging, and error normalization live in exactly
// one place.

use arc_swap::ArcSwapOption;
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{Deleted, Page};

/// Client for the venue backend's REST API.
///
/// Holds the live bearer token behind an `ArcSwapOption` so a login (or
/// forced logout) on one task is visible to every in-flight caller
/// without locking.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ArcSwapOption<SecretString>,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client from an existing `reqwest::Client`.
    ///
    /// Used by tests to point at a mock server.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: ArcSwapOption::empty(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Raw HTTP client, for the login path that must not attach a
    /// bearer token.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Install the bearer token used for subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(std::sync::Arc::new(token)));
    }

    /// Drop the bearer token; subsequent protected calls will 401.
    pub fn clear_token(&self) {
        self.token.store(None);
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── Request plumbing ────────────────────────────────────────────

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("endpoint path should be a valid relative URL")
    }

    /// Start a request, attaching the bearer token when one is present.
    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match self.token.load_full() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self
            .request(reqwest::Method::GET, url)
            .query(params)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// GET returning the raw body as text (proposal preview HTML,
    /// CSV template).
    pub(crate) async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(resp.text().await?)
    }

    /// GET returning the raw body as bytes (proposal PDF).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(resp.bytes().await?.to_vec())
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");
        let resp = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// POST with no request body (server-side actions).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");
        let resp = self.request(reqwest::Method::POST, url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");
        let resp = self
            .request(reqwest::Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");
        let resp = self
            .request(reqwest::Method::PATCH, url)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// DELETE; a 2xx answer (the backend sends 204) becomes the
    /// `Deleted` marker so removal is a distinct success value.
    pub(crate) async fn delete(&self, path: &str) -> Result<Deleted, Error> {
        let url = self.url(path);
        debug!("DELETE {url}");
        let resp = self.request(reqwest::Method::DELETE, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(Deleted)
    }

    /// Fetch every page of a `{ items, total, page, page_size }` list.
    ///
    /// The backend caps `page_size` at 100; loop until a short page or
    /// until `total` is reached.
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<T>, Error> {
        const PAGE_SIZE: u32 = 100;

        let mut page = 1u32;
        let mut all = Vec::new();
        loop {
            let mut query: Vec<(&'static str, String)> = params.to_vec();
            query.push(("page", page.to_string()));
            query.push(("page_size", PAGE_SIZE.to_string()));

            let batch: Page<T> = self.get_with_params(path, &query).await?;
            let fetched = batch.items.len();
            all.extend(batch.items);

            if fetched < PAGE_SIZE as usize || all.len() as u64 >= batch.total {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    // ── Response handling ───────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.parse_error(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.chars().take(200).collect(),
        })
    }

    /// Normalize a non-2xx response into an `Error`.
    ///
    /// 401 always means the session is dead, regardless of body. For
    /// everything else, surface the backend's `detail` message when the
    /// body carries one.
    pub(crate) async fn parse_error(&self, status: StatusCode, response: Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::AuthExpired;
        }

        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });

        Error::Api {
            message,
            status: status.as_u16(),
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extract a human-readable message from an error body.
///
/// `detail` is a plain string for application errors and an array of
/// `{ loc, msg, type }` objects for request-validation failures.
pub(crate) fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|part| part.as_str());
                    Some(match field {
                        Some(f) => format!("{f}: {msg}"),
                        None => msg.to_owned(),
                    })
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn detail_message_from_string() {
        let body = r#"{"detail": "Venue not found"}"#;
        assert_eq!(detail_message(body).unwrap(), "Venue not found");
    }

    #[test]
    fn detail_message_from_validation_array() {
        let body = r#"{"detail": [
            {"loc": ["body", "capacity"], "msg": "ensure this value is greater than 0", "type": "value_error"},
            {"loc": ["body", "name"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let msg = detail_message(body).unwrap();
        assert_eq!(
            msg,
            "capacity: ensure this value is greater than 0; name: field required"
        );
    }

    #[test]
    fn detail_message_absent() {
        assert_eq!(detail_message("not json"), None);
        assert_eq!(detail_message(r#"{"detail": 42}"#), None);
        assert_eq!(detail_message(r#"{"other": "x"}"#), None);
    }
}
