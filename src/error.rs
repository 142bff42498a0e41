use thiserror::Error;

use crate::models::Slot;

#[derive(Debug, Error)]
pub enum DietError {
    #[error("No candidate items for {slot}")]
    EmptyCatalog { slot: Slot },

    #[error("No {slot} combination fits within the budget")]
    NoAffordableCombo { slot: Slot },

    #[error("No feasible plan: every combination broke the budget or reused an item")]
    NoFeasiblePlan,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid item '{name}': {reason}")]
    InvalidItem { name: String, reason: String },

    #[error("Store not found: {query}{}", format_suggestions(.suggestions))]
    StoreNotFound {
        query: String,
        suggestions: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (known stores: {})", suggestions.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, DietError>;
