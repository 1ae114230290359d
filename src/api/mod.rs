pub mod auth;
pub mod cache;
pub mod flow;
pub mod request;
pub mod response;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

pub use auth::CredentialRecord;
pub use cache::{CredentialStore, FileCache, MemoryCache};
pub use flow::{Credentials, Flow};
use request::{TimeRange, TopItemType};
use response::{Artist, ErrorBody, TopItems, Track};

use crate::Error;

pub(crate) static API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Wrapper to build and send spotify web api requests using `reqwest`
pub(crate) struct SpotifyRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Raw body of a successful spotify response
#[derive(Debug)]
pub struct SpotifyResponse {
    body: String,
}

impl SpotifyResponse {
    async fn from_response(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status();
        let body = response.text().await.map_err(Error::custom)?;

        if status.is_success() {
            return Ok(SpotifyResponse { body });
        }

        Err(match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => Error::Request {
                code: error.status,
                message: error.message,
            },
            Err(_) => Error::Request {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Failed to make spotify request")
                    .to_string(),
            },
        })
    }

    /// Deserialize the body, reporting the json path of any missing or mistyped field
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        response::pares!(&self.body).map_err(|err| Error::DataShape(err.to_string()))
    }
}

impl SpotifyRequest {
    pub fn get<S: AsRef<str>>(url: S) -> Self {
        Self {
            url: url.as_ref().to_string(),
            params: Vec::new(),
        }
    }

    pub fn param<K: AsRef<str>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.as_ref().to_string(), value.to_string()));
        self
    }

    pub async fn send(
        self,
        client: &reqwest::Client,
        base_url: &str,
        token: &str,
    ) -> Result<SpotifyResponse, Error> {
        let base_url = base_url.trim_end_matches('/');
        let mut url = format!("{base_url}/{}", self.url.trim_start_matches('/'));
        if !self.params.is_empty() {
            url = format!("{url}?{}", serde_urlencoded::to_string(&self.params)?);
        }

        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(Error::custom)?;

        SpotifyResponse::from_response(response).await
    }
}

/// Read-only client for the current user's listening statistics
#[derive(Debug, Clone)]
pub struct Spotify {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl Spotify {
    pub fn new<S: Into<String>>(access_token: S) -> Self {
        Self {
            token: access_token.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the current user's top tracks
    ///
    /// # Scopes
    /// - user-top-read
    pub async fn top_tracks(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> Result<TopItems<Track>, Error> {
        self.top_items(TopItemType::Tracks, range, limit).await
    }

    /// Get the current user's top artists
    ///
    /// # Scopes
    /// - user-top-read
    pub async fn top_artists(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> Result<TopItems<Artist>, Error> {
        self.top_items(TopItemType::Artists, range, limit).await
    }

    async fn top_items<T: DeserializeOwned>(
        &self,
        kind: TopItemType,
        range: TimeRange,
        limit: usize,
    ) -> Result<TopItems<T>, Error> {
        log::debug!("GET /me/top/{kind} time_range={range} limit={limit}");
        SpotifyRequest::get(format!("me/top/{kind}"))
            .param("time_range", range)
            .param("limit", limit)
            .send(&self.client, &self.base_url, &self.token)
            .await?
            .json()
    }
}
