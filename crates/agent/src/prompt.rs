use griddle_core::currency::format_usd;
use griddle_core::menu::Catalog;
use tera::{Context, Tera};
use thiserror::Error;

const CONVERSATION_TEMPLATE: &str = include_str!("../templates/conversation_prompt.md");

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("system prompt rendering failed: {0}")]
    Render(#[from] tera::Error),
}

/// Renders the system prompt with the menu inlined, grouped by category in
/// catalog order.
pub fn render_system_prompt(catalog: &Catalog) -> Result<String, PromptError> {
    let mut context = Context::new();
    context.insert("catalog_text", &format_catalog(catalog));
    Ok(Tera::one_off(CONVERSATION_TEMPLATE, &context, false)?)
}

fn format_catalog(catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    let mut current_category: Option<&str> = None;

    for item in catalog.items() {
        if current_category != Some(item.category.as_str()) {
            current_category = Some(item.category.as_str());
            lines.push(format!("\n{}s:", capitalize(item.category.as_str())));
        }
        lines.push(format!("  {} (ID: {}) - {}", item.name, item.id, format_usd(item.price)));
        lines.push(format!("    {}", item.description));
    }

    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
