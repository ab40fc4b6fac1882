pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod scraper;
pub mod view;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use api::models::Recipe;
use config::Config;

/// A parsed page kept for `Config::cache_ttl`.
#[derive(Clone)]
pub struct CachedRecipe {
    pub recipe: Recipe,
    pub timestamp: DateTime<Utc>,
}

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub cache: Arc<Mutex<HashMap<String, CachedRecipe>>>,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let http = crate::scraper::build_http_client(config.fetch_timeout)?;
        Ok(AppState {
            config: Arc::new(config),
            http,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }
}
