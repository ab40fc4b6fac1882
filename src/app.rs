//! Page state and the parse trigger.

use tracing::{debug, info};

use crate::api::models::Recipe;
use crate::client::RecipeSource;
use crate::error::ClientError;

pub const PARSE_LABEL: &str = "Parse Recipe";
pub const PARSING_LABEL: &str = "Parsing...";

/// A message shown to the user as a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Notice {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("{0}")]
    Failed(String),
}

/// State behind the single page: the URL field, the in-flight flag and the
/// last successfully parsed recipe.
#[derive(Debug, Default)]
pub struct App {
    url: String,
    recipe: Recipe,
    loading: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.loading
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading { PARSING_LABEL } else { PARSE_LABEL }
    }

    /// Presses the trigger.
    ///
    /// Returns the URL to submit, `None` when the trigger is disabled because a
    /// request is already in flight, or a notice when the field is blank. The
    /// URL is checked after trimming but submitted as typed.
    pub fn begin_parse(&mut self) -> Result<Option<String>, Notice> {
        if !self.trigger_enabled() {
            debug!("trigger pressed while a parse is in flight");
            return Ok(None);
        }
        if self.url.trim().is_empty() {
            return Err(Notice::EmptyUrl);
        }
        self.loading = true;
        info!(url = %self.url, "parse started");
        Ok(Some(self.url.clone()))
    }

    /// Applies the outcome of the in-flight request and clears the flag.
    pub fn finish_parse(&mut self, outcome: Result<Recipe, ClientError>) -> Result<(), Notice> {
        self.loading = false;
        match outcome {
            Ok(recipe) => {
                info!(
                    ingredients = recipe.ingredients.len(),
                    steps = recipe.steps.len(),
                    "parse finished"
                );
                self.recipe = recipe;
                Ok(())
            }
            Err(err) => Err(Notice::Failed(err.to_string())),
        }
    }

    /// Runs one full parse against `source`.
    pub async fn handle_parse<S: RecipeSource>(&mut self, source: &S) -> Result<(), Notice> {
        let Some(url) = self.begin_parse()? else {
            return Ok(());
        };
        let outcome = source.fetch_recipe(&url).await;
        self.finish_parse(outcome)
    }
}
