pub mod activity;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gist;
pub mod logging;
pub mod publish;

pub use error::{Error, Result};
