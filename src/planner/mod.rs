pub mod combos;
pub mod config;
pub mod constants;
pub mod optimizer;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod targets;

pub use combos::{combo_count, generate_combos};
pub use config::{Band, Execution, MacroBands, PlannerConfig, ScoreWeights, SlotSplit};
pub use constants::*;
pub use optimizer::{SearchControl, SearchOutcome, optimize, optimize_with_control};
pub use pipeline::{SlotViews, plan_day, slot_candidates};
pub use ranking::{closest_to_remaining, rank_candidates, trim_catalog};
pub use scoring::{band_penalty, score_plan};
pub use targets::{
    ActivityLevel, BodyProfile, IntakeEstimate, MacroTargets, Sex, TargetProfile,
    calc_target_intake, tdee_kcal,
};
