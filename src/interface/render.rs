use crate::models::{Bundle, Item, Plan, Slot};
use crate::planner::constants::ON_TARGET_KCAL;
use crate::planner::{IntakeEstimate, TargetProfile};

/// Format a yen amount with thousands separators.
pub fn format_yen(yen: u32) -> String {
    let digits = yen.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("¥{}", out)
}

fn display_bundle(slot: Slot, bundle: &Bundle<'_>, target_kcal: u32) {
    let t = &bundle.totals;
    println!(
        "--- {} (target {} kcal, picked {} kcal, {:+}) ---",
        slot,
        target_kcal,
        t.kcal,
        t.kcal as i64 - target_kcal as i64
    );

    let max_name_len = bundle.items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    for item in &bundle.items {
        println!(
            "  {:<width$}  {:>4} kcal  {:>7}  P{:.0} F{:.0} C{:.0} Fiber {:.1} g  [{}]",
            item.name,
            item.kcal,
            format_yen(item.price),
            item.protein_g,
            item.fat_g,
            item.carb_g,
            item.fiber_g,
            item.store,
            width = max_name_len
        );
    }

    println!(
        "  subtotal: {} kcal / {}  P{:.0} F{:.0} C{:.0} Fiber {:.1} g",
        t.kcal,
        format_yen(t.price),
        t.protein_g,
        t.fat_g,
        t.carb_g,
        t.fiber_g
    );
    println!();
}

/// Display a plan: per-slot line items, a day summary, and the delta to target.
pub fn display_plan(plan: &Plan<'_>, targets: &TargetProfile, budget: u32) {
    println!();
    println!("=== Today's Plan (no item repeated) ===");
    println!();

    for slot in Slot::ALL {
        display_bundle(slot, plan.bundle(slot), targets.slot_target(slot));
    }

    let t = &plan.totals;
    let m = &targets.macros;
    let delta = plan.kcal_delta(targets.intake_kcal);

    println!("--- Day Summary ---");
    println!(
        "Calories: {} kcal (target {}, {:+} kcal{})",
        t.kcal,
        targets.intake_kcal,
        delta,
        if delta.abs() <= ON_TARGET_KCAL {
            ", on target"
        } else {
            ""
        }
    );
    println!("Price: {} of {}", format_yen(t.price), format_yen(budget));
    println!(
        "Protein: {:.0} g (target {:.0})  Fat: {:.0} g (target {:.0})  Carb: {:.0} g (target {:.0})",
        t.protein_g, m.protein_g, t.fat_g, m.fat_g, t.carb_g, m.carb_g
    );
    println!(
        "Fiber: {:.1} g (floor {:.0})",
        t.fiber_g, targets.fiber_floor_g
    );
    println!("Score: {:.2}", plan.score);
    println!();
}

/// Display intake estimate and derived targets.
pub fn display_targets(estimate: Option<&IntakeEstimate>, targets: &TargetProfile) {
    println!();
    println!("=== Daily Targets ===");
    if let Some(e) = estimate {
        println!("TDEE: {} kcal", e.tdee_kcal);
        println!(
            "Deficit: {} kcal/day over {} days",
            e.deficit_per_day_kcal, e.days
        );
    }
    println!("Intake: {} kcal", targets.intake_kcal);
    println!(
        "Split: breakfast {} / lunch {} / dinner {} kcal",
        targets.slot_kcal[0], targets.slot_kcal[1], targets.slot_kcal[2]
    );
    println!(
        "Protein {:.0} g / Fat {:.0} g / Carb {:.0} g / Fiber >= {:.0} g",
        targets.macros.protein_g,
        targets.macros.fat_g,
        targets.macros.carb_g,
        targets.fiber_floor_g
    );
    println!();
}

/// Display a simple list of items with their details.
pub fn display_item_list(items: &[&Item], title: &str) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    for item in items {
        println!(
            "  {} - {} kcal, {}, P:{} F:{} C:{} Fiber:{} [{} / {}]",
            item.name,
            item.kcal,
            format_yen(item.price),
            item.protein_g,
            item.fat_g,
            item.carb_g,
            item.fiber_g,
            item.store,
            item.category
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(0), "¥0");
        assert_eq!(format_yen(980), "¥980");
        assert_eq!(format_yen(1200), "¥1,200");
        assert_eq!(format_yen(1234567), "¥1,234,567");
    }
}
