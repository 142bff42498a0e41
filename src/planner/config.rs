use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};
use crate::models::Slot;
use crate::planner::constants::*;

/// Share of the day's intake assigned to each slot. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotSplit {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
}

impl Default for SlotSplit {
    fn default() -> Self {
        let [breakfast, lunch, dinner] = DEFAULT_SLOT_SPLIT;
        Self {
            breakfast,
            lunch,
            dinner,
        }
    }
}

impl SlotSplit {
    pub fn fraction(&self, slot: Slot) -> f64 {
        match slot {
            Slot::Breakfast => self.breakfast,
            Slot::Lunch => self.lunch,
            Slot::Dinner => self.dinner,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for slot in Slot::ALL {
            let f = self.fraction(slot);
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(DietError::Configuration(format!(
                    "{} fraction must be within [0, 1], got {}",
                    slot, f
                )));
            }
        }
        let sum = self.breakfast + self.lunch + self.dinner;
        if (sum - 1.0).abs() > SLOT_SPLIT_TOLERANCE {
            return Err(DietError::Configuration(format!(
                "slot fractions must sum to 1.0, got {:.6}",
                sum
            )));
        }
        Ok(())
    }
}

/// Per-term weights of the plan score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
    pub fiber: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            kcal: W_KCAL,
            protein: W_PROTEIN,
            fat: W_FAT,
            carb: W_CARB,
            fiber: W_FIBER,
        }
    }
}

/// Tolerance band as multiples of a target: `[target * lo, target * hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub lo: f64,
    pub hi: f64,
}

impl Band {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Absolute bounds for a given target.
    #[inline]
    pub fn bounds(&self, target: f64) -> (f64, f64) {
        (target * self.lo, target * self.hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroBands {
    pub protein: Band,
    pub fat: Band,
    pub carb: Band,
}

impl Default for MacroBands {
    fn default() -> Self {
        Self {
            protein: Band::new(PROTEIN_BAND.0, PROTEIN_BAND.1),
            fat: Band::new(FAT_BAND.0, FAT_BAND.1),
            carb: Band::new(CARB_BAND.0, CARB_BAND.1),
        }
    }
}

/// How the tri-slot search is executed. Both backends return the same plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

/// Every tunable of the planner, passed by reference through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_items: usize,
    pub keep_top: usize,
    pub dinner_prefix: usize,
    pub trim_per_slot: usize,
    pub slot_split: SlotSplit,
    pub weights: ScoreWeights,
    pub bands: MacroBands,
    pub over_penalty: f64,
    pub fiber_floor_g: f64,
    pub protein_g_per_kg: f64,
    pub fat_kcal_ratio: f64,
    pub execution: Execution,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            keep_top: DEFAULT_KEEP_TOP,
            dinner_prefix: DEFAULT_DINNER_PREFIX,
            trim_per_slot: DEFAULT_TRIM_PER_SLOT,
            slot_split: SlotSplit::default(),
            weights: ScoreWeights::default(),
            bands: MacroBands::default(),
            over_penalty: OVER_PENALTY,
            fiber_floor_g: FIBER_FLOOR_G,
            protein_g_per_kg: PROTEIN_G_PER_KG,
            fat_kcal_ratio: FAT_KCAL_RATIO,
            execution: Execution::default(),
        }
    }
}

fn non_negative(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DietError::Configuration(format!(
            "{} must be a non-negative number, got {}",
            label, value
        )))
    }
}

fn at_least_one(label: &str, value: usize) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(DietError::Configuration(format!("{} must be at least 1", label)))
    }
}

impl PlannerConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed settings before any search starts.
    pub fn validate(&self) -> Result<()> {
        at_least_one("max_items", self.max_items)?;
        at_least_one("keep_top", self.keep_top)?;
        at_least_one("dinner_prefix", self.dinner_prefix)?;
        at_least_one("trim_per_slot", self.trim_per_slot)?;

        self.slot_split.validate()?;

        let w = &self.weights;
        non_negative("weights.kcal", w.kcal)?;
        non_negative("weights.protein", w.protein)?;
        non_negative("weights.fat", w.fat)?;
        non_negative("weights.carb", w.carb)?;
        non_negative("weights.fiber", w.fiber)?;

        for (label, band) in [
            ("bands.protein", self.bands.protein),
            ("bands.fat", self.bands.fat),
            ("bands.carb", self.bands.carb),
        ] {
            non_negative(label, band.lo)?;
            non_negative(label, band.hi)?;
            if band.lo > band.hi {
                return Err(DietError::Configuration(format!(
                    "{} lower bound {} exceeds upper bound {}",
                    label, band.lo, band.hi
                )));
            }
        }

        non_negative("over_penalty", self.over_penalty)?;
        non_negative("fiber_floor_g", self.fiber_floor_g)?;
        non_negative("protein_g_per_kg", self.protein_g_per_kg)?;
        non_negative("fat_kcal_ratio", self.fat_kcal_ratio)?;
        if self.fat_kcal_ratio > 1.0 {
            return Err(DietError::Configuration(format!(
                "fat_kcal_ratio must be at most 1.0, got {}",
                self.fat_kcal_ratio
            )));
        }

        Ok(())
    }
}
