use std::fmt::Display;
use std::sync::Arc;

use crate::activity::ActivitySummary;
use crate::api::cache::{CredentialStore, FileCache};
use crate::api::flow::Flow;
use crate::api::Spotify;
use crate::config::Config;
use crate::gist::{Gist, Gists};
use crate::publish::{render, Publisher};
use crate::Error;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    TokenObtained,
    SummaryFetched,
    Published,
    Failed,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::TokenObtained => write!(f, "token obtained"),
            Stage::SummaryFetched => write!(f, "summary fetched"),
            Stage::Published => write!(f, "published"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Published(Gist),
    /// Dry run, the gist was left alone
    Preview(String),
}

pub struct App {
    config: Config,
    store: Arc<dyn CredentialStore>,
    stage: Stage,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(FileCache::new(&config.cache_path));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            store,
            stage: Stage::Init,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        log::info!("{} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Token, summary, publish. Any failure ends the run in [`Stage::Failed`].
    pub async fn run(&mut self) -> Result<Outcome, Error> {
        match self.execute().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::error!("Run failed after stage `{}`: {err}", self.stage);
                self.advance(Stage::Failed);
                Err(err)
            }
        }
    }

    async fn execute(&mut self) -> Result<Outcome, Error> {
        let flow = Flow::new(self.config.credentials.clone(), self.store.clone())
            .with_token_url(&self.config.token_url)
            .with_redirect_uri(&self.config.redirect_uri);
        let access_token = flow.access_token(self.config.seed_code.as_deref()).await?;
        self.advance(Stage::TokenObtained);

        let spotify = Spotify::new(access_token).with_base_url(&self.config.api_url);
        let summary = ActivitySummary::fetch(&spotify).await?;
        self.advance(Stage::SummaryFetched);

        if self.config.dry_run {
            log::info!("Dry run, leaving gist {} untouched", self.config.gist_id);
            return Ok(Outcome::Preview(render(&summary)));
        }

        let gists = Gists::new(&self.config.github_token).with_base_url(&self.config.github_url);
        let gist = Publisher::new(gists, &self.config.gist_id)
            .with_filename(&self.config.filename)
            .publish(&summary)
            .await?;
        self.advance(Stage::Published);

        Ok(Outcome::Published(gist))
    }
}
