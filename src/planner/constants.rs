/// Largest number of items in one slot's bundle.
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// Ranked bundles kept per slot before the cross-slot search.
pub const DEFAULT_KEEP_TOP: usize = 60;

/// Dinner bundles examined per (breakfast, lunch) pair after re-ranking.
pub const DEFAULT_DINNER_PREFIX: usize = 60;

/// Catalog items kept per slot before combination generation.
pub const DEFAULT_TRIM_PER_SLOT: usize = 40;

/// Default breakfast / lunch / dinner share of the day's intake.
pub const DEFAULT_SLOT_SPLIT: [f64; 3] = [0.20, 0.40, 0.40];

/// Allowed drift of the slot split sum from 1.0.
pub const SLOT_SPLIT_TOLERANCE: f64 = 1e-6;

// ─────────────────────────────────────────────────────────────────────────────
// Plan scoring
// ─────────────────────────────────────────────────────────────────────────────

pub const W_KCAL: f64 = 1.0;
pub const W_PROTEIN: f64 = 0.8;
pub const W_FAT: f64 = 0.6;
pub const W_CARB: f64 = 0.4;
pub const W_FIBER: f64 = 0.5;

/// Discount applied to overshooting a macro band, relative to undershooting it.
pub const OVER_PENALTY: f64 = 0.5;

/// Protein band as multiples of the protein target.
pub const PROTEIN_BAND: (f64, f64) = (0.90, 1.15);

/// Fat band as multiples of the fat target.
pub const FAT_BAND: (f64, f64) = (0.85, 1.15);

/// Carbohydrate band as multiples of the carbohydrate target.
pub const CARB_BAND: (f64, f64) = (0.85, 1.15);

/// Daily fiber floor in grams.
pub const FIBER_FLOOR_G: f64 = 18.0;

// ─────────────────────────────────────────────────────────────────────────────
// Intake and macro targets
// ─────────────────────────────────────────────────────────────────────────────

/// Lowest daily intake the calculator will recommend.
pub const MIN_INTAKE_KCAL: u32 = 1200;

/// Energy of one kg of body fat.
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Protein target per kg of body weight.
pub const PROTEIN_G_PER_KG: f64 = 1.6;

/// Share of intake calories taken from fat.
pub const FAT_KCAL_RATIO: f64 = 0.25;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ─────────────────────────────────────────────────────────────────────────────
// Display thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Calorie delta (either side) within which a plan is shown as on target.
pub const ON_TARGET_KCAL: i64 = 50;

/// Jaro-Winkler similarity needed to accept a store name that is not an exact match.
pub const STORE_MATCH_THRESHOLD: f64 = 0.85;
