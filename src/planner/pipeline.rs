use std::collections::HashSet;

use crate::error::{DietError, Result};
use crate::models::{Bundle, Item, Slot};
use crate::planner::combos::{combo_count, generate_combos};
use crate::planner::config::PlannerConfig;
use crate::planner::optimizer::{SearchControl, SearchOutcome, optimize_with_control};
use crate::planner::ranking::{rank_candidates, trim_catalog};
use crate::planner::targets::TargetProfile;

/// Eligible items per slot, already filtered by store and slot hint.
#[derive(Debug, Clone, Default)]
pub struct SlotViews<'a> {
    pub breakfast: Vec<&'a Item>,
    pub lunch: Vec<&'a Item>,
    pub dinner: Vec<&'a Item>,
}

impl<'a> SlotViews<'a> {
    pub fn get(&self, slot: Slot) -> &[&'a Item] {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
        }
    }
}

/// Trim, expand into bundles, and rank one slot's view.
pub fn slot_candidates<'a>(
    slot: Slot,
    view: &[&'a Item],
    targets: &TargetProfile,
    daily_budget: u32,
    config: &PlannerConfig,
) -> Result<Vec<Bundle<'a>>> {
    if view.is_empty() {
        return Err(DietError::EmptyCatalog { slot });
    }

    let mut seen = HashSet::new();
    if let Some(dup) = view.iter().find(|item| !seen.insert(item.name.as_str())) {
        return Err(DietError::InvalidItem {
            name: dup.name.clone(),
            reason: format!("appears more than once in the {} view", slot),
        });
    }

    let target = targets.slot_target(slot);
    let trimmed = trim_catalog(view, slot, target, config.trim_per_slot);
    // Each slot is bounded by the whole day's budget; affordability of the day is
    // enforced by the optimizer.
    let combos = generate_combos(&trimmed, daily_budget, config.max_items);
    if combos.is_empty() {
        return Err(DietError::NoAffordableCombo { slot });
    }
    let generated = combos.len();
    let ranked = rank_candidates(combos, target, config.keep_top);

    tracing::debug!(
        %slot,
        view = view.len(),
        trimmed = trimmed.len(),
        considered = combo_count(trimmed.len(), config.max_items),
        generated,
        kept = ranked.len(),
        target_kcal = target,
        "slot candidates ready"
    );

    Ok(ranked)
}

/// Run the whole planner for one day: trim, combine, rank, and search.
pub fn plan_day<'a>(
    views: &SlotViews<'a>,
    targets: &TargetProfile,
    daily_budget: u32,
    config: &PlannerConfig,
    control: &SearchControl,
) -> Result<SearchOutcome<'a>> {
    config.validate()?;

    let breakfast = slot_candidates(Slot::Breakfast, views.get(Slot::Breakfast), targets, daily_budget, config)?;
    let lunch = slot_candidates(Slot::Lunch, views.get(Slot::Lunch), targets, daily_budget, config)?;
    let dinner = slot_candidates(Slot::Dinner, views.get(Slot::Dinner), targets, daily_budget, config)?;

    optimize_with_control(
        &breakfast,
        &lunch,
        &dinner,
        targets,
        daily_budget,
        config,
        control,
    )
}
