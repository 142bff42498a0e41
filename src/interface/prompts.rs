use dialoguer::{Confirm, Input, Select};

use crate::error::{DietError, Result};
use crate::models::Slot;

/// Answers to the "today" questions asked before planning.
#[derive(Debug, Clone)]
pub struct TodayInputs {
    pub weight_kg: f64,
    pub budget: u32,
    /// Breakfast, lunch, dinner store.
    pub stores: [String; 3],
}

/// Prompt for today's body weight.
pub fn prompt_weight(default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Today's weight (kg)")
        .default(format!("{:.1}", default))
        .interact_text()?;

    let weight: f64 = input
        .trim()
        .parse()
        .map_err(|_| DietError::InvalidInput("Invalid number".to_string()))?;

    if !(35.0..=150.0).contains(&weight) {
        return Err(DietError::InvalidInput(
            "Weight must be between 35 and 150 kg".to_string(),
        ));
    }

    Ok(weight)
}

/// Prompt for today's food budget in yen.
pub fn prompt_budget(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Today's budget (yen)")
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| DietError::InvalidInput("Budget must be a whole number of yen".to_string()))
}

/// Let the user pick which store to buy a slot's meal from.
pub fn prompt_store(slot: Slot, stores: &[String], default: usize) -> Result<String> {
    if stores.is_empty() {
        return Err(DietError::InvalidInput(
            "The catalog lists no stores".to_string(),
        ));
    }

    let selection = Select::new()
        .with_prompt(format!("Store for {}", slot))
        .items(stores)
        .default(default.min(stores.len() - 1))
        .interact()?;

    Ok(stores[selection].clone())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask for weight, budget, and one store per slot.
///
/// Stores default to the first, second, and third store in the list.
pub fn collect_today_inputs(
    stores: &[String],
    default_weight: f64,
    default_budget: u32,
) -> Result<TodayInputs> {
    let weight_kg = prompt_weight(default_weight)?;
    let budget = prompt_budget(default_budget)?;

    let breakfast = prompt_store(Slot::Breakfast, stores, 0)?;
    let lunch = prompt_store(Slot::Lunch, stores, 1)?;
    let dinner = prompt_store(Slot::Dinner, stores, 2)?;

    Ok(TodayInputs {
        weight_kg,
        budget,
        stores: [breakfast, lunch, dinner],
    })
}
