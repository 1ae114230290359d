use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::api::flow::{Credentials, REDIRECT_URI, TOKEN_URL};
use crate::api::API_BASE_URL;
use crate::gist::GITHUB_API_URL;
use crate::publish::CANONICAL_FILENAME;
use crate::Error;

/// Publish your spotify listening activity to a github gist
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// File the spotify tokens are cached in between runs
    #[arg(long, env = "SPOTIFY_AUTH_CACHE", default_value = "spotify-auth.json")]
    pub cache: PathBuf,
    /// Name the gist file is renamed to
    #[arg(long, default_value = CANONICAL_FILENAME)]
    pub filename: String,
    /// Print the rendered summary instead of updating the gist
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            cache: PathBuf::from("spotify-auth.json"),
            filename: CANONICAL_FILENAME.to_string(),
            dry_run: false,
        }
    }
}

/// Secrets and ids read from the environment
#[derive(Debug, Clone, Deserialize)]
struct Env {
    gist_id: String,
    github_token: String,
    spotify_client_id: String,
    spotify_client_secret: String,
    #[serde(default)]
    spotify_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gist_id: String,
    pub github_token: String,
    pub credentials: Credentials,
    /// One-time authorization code, only needed until a refresh token is cached
    pub seed_code: Option<String>,
    pub cache_path: PathBuf,
    pub filename: String,
    pub dry_run: bool,
    pub redirect_uri: String,
    pub token_url: String,
    pub api_url: String,
    pub github_url: String,
}

impl Config {
    /// Build the config from process environment variables
    ///
    /// # Variables
    /// - `GIST_ID`: Gist to publish into
    /// - `GITHUB_TOKEN`: Token allowed to edit the gist
    /// - `SPOTIFY_CLIENT_ID`: Client ID
    /// - `SPOTIFY_CLIENT_SECRET`: Client secret
    /// - `SPOTIFY_CODE`: Authorization code, first run only
    pub fn from_env(args: Args) -> Result<Self, Error> {
        Self::from_parts(envy::from_env()?, args)
    }

    pub fn from_vars<I>(vars: I, args: Args) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::from_parts(envy::from_iter(vars)?, args)
    }

    fn from_parts(env: Env, args: Args) -> Result<Self, Error> {
        for (name, value) in [
            ("GIST_ID", &env.gist_id),
            ("GITHUB_TOKEN", &env.github_token),
            ("SPOTIFY_CLIENT_ID", &env.spotify_client_id),
            ("SPOTIFY_CLIENT_SECRET", &env.spotify_client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} is empty")));
            }
        }

        Ok(Self {
            credentials: Credentials::new(&env.spotify_client_id, &env.spotify_client_secret),
            gist_id: env.gist_id,
            github_token: env.github_token,
            seed_code: env.spotify_code.filter(|code| !code.trim().is_empty()),
            cache_path: args.cache,
            filename: args.filename,
            dry_run: args.dry_run,
            redirect_uri: REDIRECT_URI.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_url: API_BASE_URL.to_string(),
            github_url: GITHUB_API_URL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        [
            ("GIST_ID", "abc"),
            ("GITHUB_TOKEN", "gh"),
            ("SPOTIFY_CLIENT_ID", "client"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]
        .iter()
        .chain(extra)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn loads_required_variables() {
        let config = Config::from_vars(vars(&[("SPOTIFY_CODE", "seed")]), Args::default()).unwrap();

        assert_eq!(config.gist_id, "abc");
        assert_eq!(config.credentials, Credentials::new("client", "secret"));
        assert_eq!(config.seed_code.as_deref(), Some("seed"));
        assert_eq!(config.cache_path, PathBuf::from("spotify-auth.json"));
        assert_eq!(config.filename, CANONICAL_FILENAME);
        assert_eq!(config.redirect_uri, "http://localhost/");
    }

    #[test]
    fn blank_code_is_no_code() {
        let config = Config::from_vars(vars(&[("SPOTIFY_CODE", "  ")]), Args::default()).unwrap();
        assert_eq!(config.seed_code, None);
    }

    #[test]
    fn missing_variable_is_config_error() {
        let partial = vars(&[]).into_iter().filter(|(k, _)| k != "GITHUB_TOKEN");
        let err = Config::from_vars(partial, Args::default()).unwrap_err();

        assert!(matches!(err, Error::Config(message) if message.contains("github_token")));
    }

    #[test]
    fn empty_variable_is_config_error() {
        let mut vars = vars(&[]);
        vars[0].1 = String::new();

        let err = Config::from_vars(vars, Args::default()).unwrap_err();
        assert_eq!(err, Error::Config("GIST_ID is empty".into()));
    }

    #[test]
    fn args_parse_flags() {
        let args =
            Args::try_parse_from(["spotify-gist", "--cache", "/tmp/auth.json", "--dry-run"])
                .unwrap();

        assert_eq!(args.cache, PathBuf::from("/tmp/auth.json"));
        assert!(args.dry_run);
        assert_eq!(args.filename, CANONICAL_FILENAME);
    }
}
