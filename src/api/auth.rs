use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Spotify tokens that survive between runs
///
/// The refresh token is only ever replaced, never cleared: spotify does not hand out a new
/// refresh token on every exchange.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "spotifyAccessToken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "spotifyRefreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialRecord {
    pub fn new<A: Into<String>>(access_token: A, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// Merge a token exchange into the record and return the new access token
    pub fn apply(&mut self, response: TokenResponse) -> Result<String, Error> {
        let access_token = response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::Authentication("token response did not include an access token".into())
            })?;

        self.access_token = Some(access_token.clone());
        if let Some(refresh_token) = response.refresh_token.filter(|token| !token.is_empty()) {
            self.refresh_token = Some(refresh_token);
        }
        Ok(access_token)
    }
}

/// Body of `POST /api/token`
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Parse the token endpoint response, turning oauth error bodies and failed statuses into
    /// [`Error::Authentication`]
    pub fn parse(status: StatusCode, body: &str) -> Result<Self, Error> {
        let response: TokenResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(err) if status.is_success() => {
                return Err(Error::Authentication(format!("malformed token response: {err}")));
            }
            Err(_) => {
                return Err(Error::Authentication(format!("[{}] {}", status.as_u16(), body.trim())));
            }
        };

        if let Some(error) = &response.error {
            return Err(Error::Authentication(match &response.error_description {
                Some(description) => format!("{error}: {description}"),
                None => error.clone(),
            }));
        }

        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "token endpoint responded with {}",
                status.as_u16()
            )));
        }

        Ok(response)
    }
}
