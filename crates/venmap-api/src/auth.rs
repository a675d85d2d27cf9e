// Authentication endpoints
//
// Bearer-token login/logout and account lookup. A successful login
// installs the token on the client, so every later call is
// authenticated automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Token, User};

impl ApiClient {
    /// Authenticate with email/password.
    ///
    /// `POST /api/v1/auth/login`
    ///
    /// On success the returned bearer token is installed on this client
    /// and used for all subsequent requests. Failures map to
    /// [`Error::Authentication`] rather than [`Error::AuthExpired`]:
    /// a rejected login is not an expired session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Token, Error> {
        let url = self.base_url().join("/api/v1/auth/login")?;
        debug!("logging in at {url}");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = crate::client::detail_message(&body)
                .unwrap_or_else(|| format!("login failed (HTTP {status})"));
            return Err(Error::Authentication { message });
        }

        let body = resp.text().await?;
        let token: Token =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.chars().take(200).collect(),
            })?;

        self.set_token(token.access_token.clone().into());
        debug!("login successful");
        Ok(token)
    }

    /// Forget the bearer token. The backend keeps no session state, so
    /// logout is purely client-side.
    pub fn logout(&self) {
        self.clear_token();
        debug!("logged out");
    }

    /// Fetch the account behind the current token.
    ///
    /// `GET /api/v1/auth/me`
    pub async fn me(&self) -> Result<User, Error> {
        self.get("/api/v1/auth/me").await
    }

    /// Create a new account.
    ///
    /// `POST /api/v1/auth/register`
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, Error> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("/api/v1/auth/register", &body).await
    }
}
