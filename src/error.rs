use std::fmt::{Display, Formatter};

use color_eyre::{Report, Section};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The token exchange failed or did not hand back an access token
    Authentication(String),
    /// A provider response is missing a field the summary is built from
    DataShape(String),
    DocumentNotFound(String),
    Publish(String),
    /// Non-success status from the spotify data api
    Request { code: u16, message: String },
    Config(String),
    Io(String),
    Json(String),
    Unknown(String),
}

impl Error {
    pub fn custom<S: Display>(message: S) -> Self {
        Error::Unknown(message.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Authentication(message) => {
                write!(f, "spotify authentication failed: {message}")
            }
            Error::DataShape(message) => write!(f, "unexpected spotify response: {message}"),
            Error::DocumentNotFound(message) => write!(f, "gist not found: {message}"),
            Error::Publish(message) => write!(f, "failed to update gist: {message}"),
            Error::Request { code, message } => {
                write!(f, "spotify request failed [{code}]: {message}")
            }
            Error::Config(message) => write!(f, "invalid configuration: {message}"),
            Error::Io(message) => write!(f, "io error: {message}"),
            Error::Json(message) => write!(f, "json error: {message}"),
            Error::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        Error::Unknown(value.to_string())
    }
}

impl From<envy::Error> for Error {
    fn from(value: envy::Error) -> Self {
        Error::Config(value.to_string())
    }
}

impl From<Error> for Report {
    fn from(value: Error) -> Self {
        let suggestion = match &value {
            Error::Authentication(_) => Some(
                "Check SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET, or delete the credential cache \
                 and supply a fresh SPOTIFY_CODE",
            ),
            Error::DataShape(_) => Some(
                "The account needs listening history in both the short and long term windows",
            ),
            Error::DocumentNotFound(_) => {
                Some("Check GIST_ID and that GITHUB_TOKEN has the gist scope")
            }
            Error::Publish(_) => Some("Check that GITHUB_TOKEN is allowed to edit the gist"),
            Error::Request { code: 401, .. } => {
                Some("The access token is invalid or expired, try refreshing it")
            }
            Error::Request { code: 403, .. } => {
                Some("Authorize the app with the user-top-read scope")
            }
            Error::Config(_) => Some(
                "Set GIST_ID, GITHUB_TOKEN, SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET in the \
                 environment or a .env file",
            ),
            _ => None,
        };

        let report = Report::msg(value.to_string());
        match suggestion {
            Some(suggestion) => report.suggestion(suggestion),
            None => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_collaborator() {
        assert_eq!(
            Error::Request { code: 429, message: "API rate limit exceeded".into() }.to_string(),
            "spotify request failed [429]: API rate limit exceeded"
        );
        assert_eq!(
            Error::DocumentNotFound("404 Not Found".into()).to_string(),
            "gist not found: 404 Not Found"
        );
    }

    #[test]
    fn converts_into_report() {
        let report = Report::from(Error::Authentication("invalid_grant".into()));
        assert!(report.to_string().contains("invalid_grant"));
    }
}
