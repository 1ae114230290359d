mod credential;

pub use credential::Credentials;

use std::fmt::Display;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use super::auth::TokenResponse;
use super::cache::CredentialStore;
use crate::logging::redact;
use crate::Error;

pub(crate) static TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub(crate) static REDIRECT_URI: &str = "http://localhost/";

/// Grant submitted to the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant<'a> {
    AuthorizationCode { code: &'a str, redirect_uri: &'a str },
    RefreshToken(&'a str),
}

impl Grant<'_> {
    pub fn form(&self) -> Result<String, Error> {
        Ok(match self {
            Grant::AuthorizationCode { code, redirect_uri } => serde_urlencoded::to_string([
                ("grant_type", "authorization_code"),
                ("code", *code),
                ("redirect_uri", *redirect_uri),
            ])?,
            Grant::RefreshToken(refresh_token) => serde_urlencoded::to_string([
                ("grant_type", "refresh_token"),
                ("refresh_token", *refresh_token),
            ])?,
        })
    }
}

impl Display for Grant<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grant::AuthorizationCode { .. } => write!(f, "authorization_code"),
            Grant::RefreshToken(_) => write!(f, "refresh_token"),
        }
    }
}

/// Authorization code flow for a process without memory
///
/// The first run spends the one-time authorization code, every later run refreshes with the
/// refresh token kept in the [`CredentialStore`].
#[derive(Clone)]
pub struct Flow {
    credentials: Credentials,
    store: Arc<dyn CredentialStore>,
    token_url: String,
    redirect_uri: String,
    client: reqwest::Client,
}

impl Flow {
    pub fn new(credentials: Credentials, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            credentials,
            store,
            token_url: TOKEN_URL.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_token_url<S: Into<String>>(mut self, url: S) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_redirect_uri<S: Into<String>>(mut self, redirect_uri: S) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Get a fresh access token.
    ///
    /// Refreshes when a refresh token is cached, otherwise exchanges `seed_code`. The merged
    /// record is saved before the token is returned.
    pub async fn access_token(&self, seed_code: Option<&str>) -> Result<String, Error> {
        let mut record = self.store.load();

        let cached = record.refresh_token.as_deref().filter(|token| !token.is_empty());
        let grant = match (cached, seed_code) {
            (Some(refresh_token), _) => Grant::RefreshToken(refresh_token),
            (None, Some(code)) => Grant::AuthorizationCode {
                code,
                redirect_uri: &self.redirect_uri,
            },
            (None, None) => {
                return Err(Error::Authentication(
                    "no cached refresh token and no authorization code (SPOTIFY_CODE) supplied"
                        .into(),
                ));
            }
        };

        if let Grant::RefreshToken(refresh_token) = grant {
            log::debug!("ref: {}", redact(refresh_token));
        }
        log::info!("Requesting spotify access token with {grant}");
        let response = self.exchange(&grant).await?;

        let access_token = record.apply(response)?;
        if let Some(refresh_token) = &record.refresh_token {
            log::debug!("ref: {}", redact(refresh_token));
        }
        log::debug!("acc: {}", redact(&access_token));

        self.store.save(&record)?;
        Ok(access_token)
    }

    async fn exchange(&self, grant: &Grant<'_>) -> Result<TokenResponse, Error> {
        let response = self
            .client
            .post(&self.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, format!("Basic {}", self.credentials))
            .body(grant.form()?)
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Authentication(format!("failed to read token response: {e}")))?;

        TokenResponse::parse(status, &body)
    }
}
