//! Text rendering of the page.

use std::fmt::Write;

use crate::app::App;

pub const TITLE: &str = "Recipe Reformat";
pub const URL_PLACEHOLDER: &str = "Paste recipe URL here...";
pub const NO_INGREDIENTS: &str = "No ingredients loaded";
pub const NO_STEPS: &str = "No steps loaded";
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A labelled display region.
#[derive(Debug, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub lines: Vec<String>,
}

pub fn ingredients_panel(app: &App) -> Panel {
    let ingredients = &app.recipe().ingredients;
    let lines = if ingredients.is_empty() {
        vec![NO_INGREDIENTS.to_string()]
    } else {
        ingredients.iter().map(|item| format!("[ ] {item}")).collect()
    };
    Panel { title: "Ingredients", lines }
}

pub fn steps_panel(app: &App) -> Panel {
    let steps = &app.recipe().steps;
    let lines = if steps.is_empty() {
        vec![NO_STEPS.to_string()]
    } else {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {step}", i + 1))
            .collect()
    };
    Panel { title: "Steps", lines }
}

pub fn author_panel(app: &App) -> Panel {
    let author = &app.recipe().author;
    let line = if author.is_empty() { UNKNOWN_AUTHOR } else { author.as_str() };
    Panel { title: "Author", lines: vec![line.to_string()] }
}

pub fn panels(app: &App) -> [Panel; 3] {
    [ingredients_panel(app), steps_panel(app), author_panel(app)]
}

/// Draws the whole page: header, input row and the three panels.
pub fn render(app: &App) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    let input = if app.url().is_empty() { URL_PLACEHOLDER } else { app.url() };
    let disabled = if app.trigger_enabled() { "" } else { " (disabled)" };
    let _ = writeln!(out, "URL: {input}");
    let _ = writeln!(out, "[ {} ]{disabled}", app.button_label());

    for panel in panels(app) {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", panel.title);
        for line in &panel.lines {
            let _ = writeln!(out, "  {line}");
        }
    }

    out
}
