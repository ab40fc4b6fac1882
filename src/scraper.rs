use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::api::models::Recipe;
use crate::error::{AppError, Result};

const USER_AGENT: &str = "Mozilla/5.0";

const STEP_KEYWORDS: [&str; 4] = ["step", "instruction", "direction", "method"];
const INGREDIENT_KEYWORDS: [&str; 1] = ["ingredients"];

// Create static selectors to avoid recompiling them each time
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("Failed to parse heading selector")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li").expect("Failed to parse li selector")
});

/// Builds the client used to download recipe pages, shared across requests.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

/// Extracts ingredient and step lists from a recipe page.
///
/// The author is not present in page markup we understand, so it is always empty.
pub fn extract_recipe(html: &str) -> Recipe {
    let document = Html::parse_document(html);
    Recipe {
        ingredients: extract_ingredients(&document),
        steps: extract_instructions(&document),
        author: String::new(),
    }
}

pub fn extract_instructions(document: &Html) -> Vec<String> {
    items_under_headings(document, &STEP_KEYWORDS)
}

pub fn extract_ingredients(document: &Html) -> Vec<String> {
    items_under_headings(document, &INGREDIENT_KEYWORDS)
}

/// Collects the items following every heading whose text mentions one of `keywords`.
///
/// Only the heading's next sibling element is considered: a list (or a `div`
/// wrapping one) contributes each of its `li`, a paragraph contributes itself.
fn items_under_headings(document: &Html, keywords: &[&str]) -> Vec<String> {
    let mut items = Vec::new();

    for heading in document.select(&HEADING_SELECTOR) {
        let title = heading.text().collect::<String>().to_lowercase();
        if !keywords.iter().any(|keyword| title.contains(keyword)) {
            continue;
        }

        let Some(next) = heading.next_siblings().find_map(ElementRef::wrap) else {
            continue;
        };

        match next.value().name() {
            "ol" | "ul" | "div" => {
                items.extend(next.select(&LIST_ITEM_SELECTOR).map(stripped_text));
            }
            "p" => items.push(stripped_text(next)),
            _ => {}
        }
    }

    items
}

// Each text node trimmed, empty ones dropped, the rest joined without separator.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
