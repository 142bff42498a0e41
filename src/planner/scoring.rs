use crate::models::Totals;
use crate::planner::config::{Band, PlannerConfig};
use crate::planner::targets::TargetProfile;

/// Penalty for a macro total against its tolerance band.
///
/// Undershoot costs `weight * (lo - actual)`; overshoot is discounted by `over_penalty`.
/// Inside the band, boundaries included, the penalty is zero.
pub fn band_penalty(actual: f64, target: f64, band: Band, weight: f64, over_penalty: f64) -> f64 {
    let (lo, hi) = band.bounds(target);
    if actual < lo {
        weight * (lo - actual)
    } else if actual > hi {
        weight * over_penalty * (actual - hi)
    } else {
        0.0
    }
}

/// Cost of a full-day plan; lower is better, never negative.
///
/// Calorie deviation from the day's intake plus banded protein/fat/carb penalties and a
/// one-sided fiber floor penalty.
pub fn score_plan(totals: &Totals, targets: &TargetProfile, config: &PlannerConfig) -> f64 {
    let w = &config.weights;
    let macros = &targets.macros;

    let kcal_gap = (totals.kcal as f64 - targets.intake_kcal as f64).abs();
    let mut score = w.kcal * kcal_gap;

    score += band_penalty(
        totals.protein_g,
        macros.protein_g,
        config.bands.protein,
        w.protein,
        config.over_penalty,
    );
    score += band_penalty(
        totals.fat_g,
        macros.fat_g,
        config.bands.fat,
        w.fat,
        config.over_penalty,
    );
    score += band_penalty(
        totals.carb_g,
        macros.carb_g,
        config.bands.carb,
        w.carb,
        config.over_penalty,
    );

    if totals.fiber_g < targets.fiber_floor_g {
        score += w.fiber * (targets.fiber_floor_g - totals.fiber_g);
    }

    score
}
