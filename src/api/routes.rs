use axum::{
    routing::post,
    Router,
    extract::{Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;
use std::sync::PoisonError;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{ParseRequest, Recipe};
use crate::scraper::{fetch_html, extract_recipe};
use crate::{AppState, CachedRecipe};

pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/parse", post(parse_handler))
        .layer(cors)
        .with_state(app_state)
}

async fn parse_handler(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<Recipe>> {
    info!(url = %req.url, "processing parse request");
    let start_time = Instant::now();

    let result = process_parse_request(&state, &req).await;

    match &result {
        Ok(recipe) => info!(
            url = %req.url,
            ingredients = recipe.ingredients.len(),
            steps = recipe.steps.len(),
            elapsed = ?start_time.elapsed(),
            "parse request completed"
        ),
        Err(err) => warn!(url = %req.url, error = %err, status = %err.status(), "parse request failed"),
    }

    result.map(Json)
}

async fn process_parse_request(state: &AppState, req: &ParseRequest) -> Result<Recipe> {
    if !req.url.starts_with("http") {
        return Err(AppError::InvalidUrl("Invalid URL".to_string()));
    }

    if let Some(recipe) = cached(state, &req.url) {
        info!(url = %req.url, "cache hit");
        return Ok(recipe);
    }

    let fetch_start = Instant::now();
    let html = fetch_html(&state.http, &req.url).await?;
    info!(url = %req.url, bytes = html.len(), elapsed = ?fetch_start.elapsed(), "page fetched");

    let recipe = extract_recipe(&html);

    {
        let mut cache = state.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();
        let ttl = state.config.cache_ttl;
        cache.retain(|_, entry| now - entry.timestamp < ttl);
        cache.insert(req.url.clone(), CachedRecipe {
            recipe: recipe.clone(),
            timestamp: now,
        });
    }

    Ok(recipe)
}

fn cached(state: &AppState, url: &str) -> Option<Recipe> {
    let cache = state.cache.lock().unwrap_or_else(PoisonError::into_inner);
    let entry = cache.get(url)?;
    let age = Utc::now() - entry.timestamp;
    (age < state.config.cache_ttl).then(|| entry.recipe.clone())
}
