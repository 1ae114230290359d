use indexmap::IndexMap;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::Error;

pub(crate) static GITHUB_API_URL: &str = "https://api.github.com";

static CLIENT_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,
    /// Absent for truncated files in list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub html_url: Option<String>,
    /// Files in the order github lists them
    pub files: IndexMap<String, GistFile>,
}

impl Gist {
    pub fn first_file(&self) -> Option<(&String, &GistFile)> {
        self.files.first()
    }
}

/// Body of `PATCH /gists/{id}`, keyed by the current file name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GistUpdate {
    pub files: IndexMap<String, GistFile>,
}

impl GistUpdate {
    pub fn rename<K, F, C>(mut self, current: K, filename: F, content: C) -> Self
    where
        K: Into<String>,
        F: Into<String>,
        C: Into<String>,
    {
        self.files.insert(
            current.into(),
            GistFile {
                filename: filename.into(),
                content: Some(content.into()),
            },
        );
        self
    }
}

/// Minimal github gists client
#[derive(Debug, Clone)]
pub struct Gists {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl Gists {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
            base_url: GITHUB_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(USER_AGENT, CLIENT_AGENT)
    }

    fn url(&self, id: &str) -> String {
        format!("{}/gists/{id}", self.base_url.trim_end_matches('/'))
    }

    /// Get a gist by id. Every failure is reported as [`Error::DocumentNotFound`]
    pub async fn get(&self, id: &str) -> Result<Gist, Error> {
        let response = self
            .request(self.client.get(self.url(id)))
            .send()
            .await
            .map_err(|e| Error::DocumentNotFound(format!("unable to get gist {id}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::DocumentNotFound(format!("unable to read gist {id}: {e}")))?;
        if !status.is_success() {
            let reason = describe(status, &body);
            return Err(Error::DocumentNotFound(format!("gist {id}: {reason}")));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::DocumentNotFound(format!("gist {id} is malformed: {e}")))
    }

    /// Apply a partial update to a gist. Every failure is reported as [`Error::Publish`]
    pub async fn update(&self, id: &str, update: &GistUpdate) -> Result<Gist, Error> {
        let response = self
            .request(self.client.patch(self.url(id)))
            .json(update)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("unable to update gist {id}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Publish(format!("unable to read gist {id}: {e}")))?;
        if !status.is_success() {
            return Err(Error::Publish(format!("gist {id}: {}", describe(status, &body))));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Publish(format!("gist {id} update response is malformed: {e}")))
    }
}

#[derive(Deserialize)]
struct GithubError {
    message: String,
}

fn describe(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<GithubError>(body) {
        Ok(error) => format!("[{}] {}", status.as_u16(), error.message),
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or("request failed");
            format!("[{}] {reason}", status.as_u16())
        }
    }
}
