use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};
use crate::models::Slot;
use crate::planner::config::{PlannerConfig, SlotSplit};
use crate::planner::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}', expected male or female", other)),
        }
    }
}

/// Activity level and its TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary (desk work, little exercise)",
            ActivityLevel::Light => "light (exercise 1-3 times a week)",
            ActivityLevel::Moderate => "moderate (exercise 3-5 times a week)",
            ActivityLevel::Active => "active (training almost daily)",
            ActivityLevel::VeryActive => "very active (twice-daily training or heavy labor)",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.label(), self.factor())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very-active" => Ok(ActivityLevel::VeryActive),
            other => Err(format!("unknown activity level '{}'", other)),
        }
    }
}

/// Body measurements and goal used to derive the daily intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyProfile {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal_weight_kg: f64,
    /// Days until the goal deadline.
    pub days_to_goal: u32,
    pub activity: ActivityLevel,
}

/// Output of the intake calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntakeEstimate {
    pub intake_kcal: u32,
    pub tdee_kcal: u32,
    pub deficit_per_day_kcal: u32,
    pub days: u32,
}

/// Revised Harris-Benedict basal metabolic rate.
pub fn bmr_harris_benedict(age: u32, sex: Sex, height_cm: f64, weight_kg: f64) -> f64 {
    let age = age as f64;
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Total daily energy expenditure, floored to whole kcal.
pub fn tdee_kcal(profile: &BodyProfile) -> u32 {
    let bmr = bmr_harris_benedict(
        profile.age,
        profile.sex,
        profile.height_cm,
        profile.weight_kg,
    );
    (bmr * profile.activity.factor()).floor().max(0.0) as u32
}

/// Daily intake needed to reach the goal weight by the deadline.
///
/// Never recommends less than `MIN_INTAKE_KCAL`.
pub fn calc_target_intake(profile: &BodyProfile) -> Result<IntakeEstimate> {
    if !(profile.weight_kg.is_finite() && profile.weight_kg > 0.0) {
        return Err(DietError::InvalidInput(format!(
            "weight must be positive, got {}",
            profile.weight_kg
        )));
    }
    if !(profile.height_cm.is_finite() && profile.height_cm > 0.0) {
        return Err(DietError::InvalidInput(format!(
            "height must be positive, got {}",
            profile.height_cm
        )));
    }

    let tdee = tdee_kcal(profile);
    let days = profile.days_to_goal.max(1);
    let to_lose = (profile.weight_kg - profile.goal_weight_kg).max(0.0);
    let deficit_per_day = to_lose * KCAL_PER_KG_FAT / days as f64;
    let intake = ((tdee as f64 - deficit_per_day) as i64).max(MIN_INTAKE_KCAL as i64) as u32;

    Ok(IntakeEstimate {
        intake_kcal: intake,
        tdee_kcal: tdee,
        deficit_per_day_kcal: deficit_per_day as u32,
        days,
    })
}

/// Daily protein, fat, and carbohydrate targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

impl MacroTargets {
    /// Protein from body weight, fat as a share of intake, carbohydrate as the remainder.
    pub fn from_intake(intake_kcal: u32, weight_kg: f64, config: &PlannerConfig) -> Self {
        let intake = intake_kcal as f64;
        let protein_g = weight_kg * config.protein_g_per_kg;
        let fat_g = intake * config.fat_kcal_ratio / KCAL_PER_G_FAT;
        let carb_kcal = intake - (protein_g * KCAL_PER_G_PROTEIN + fat_g * KCAL_PER_G_FAT);
        Self {
            protein_g,
            fat_g,
            carb_g: (carb_kcal / KCAL_PER_G_CARB).max(0.0),
        }
    }
}

/// Everything the scorer and optimizer need to know about the day's goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProfile {
    pub intake_kcal: u32,
    pub split: SlotSplit,
    /// Breakfast, lunch, dinner calorie targets; they sum to `intake_kcal`.
    pub slot_kcal: [u32; 3],
    pub macros: MacroTargets,
    pub fiber_floor_g: f64,
}

impl TargetProfile {
    pub fn new(
        intake_kcal: u32,
        split: SlotSplit,
        macros: MacroTargets,
        fiber_floor_g: f64,
    ) -> Result<Self> {
        if intake_kcal == 0 {
            return Err(DietError::Configuration(
                "intake_kcal must be positive".to_string(),
            ));
        }
        split.validate()?;
        for (label, value) in [
            ("protein target", macros.protein_g),
            ("fat target", macros.fat_g),
            ("carb target", macros.carb_g),
            ("fiber floor", fiber_floor_g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DietError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }

        let intake = intake_kcal as f64;
        let breakfast = (intake * split.breakfast).floor() as u32;
        let lunch = ((intake * split.lunch).floor() as u32).min(intake_kcal - breakfast);
        let dinner = intake_kcal - breakfast - lunch;

        Ok(Self {
            intake_kcal,
            split,
            slot_kcal: [breakfast, lunch, dinner],
            macros,
            fiber_floor_g,
        })
    }

    /// Build from an intake and body weight using the config's split and macro rule.
    pub fn from_intake(intake_kcal: u32, weight_kg: f64, config: &PlannerConfig) -> Result<Self> {
        let macros = MacroTargets::from_intake(intake_kcal, weight_kg, config);
        Self::new(intake_kcal, config.slot_split, macros, config.fiber_floor_g)
    }

    pub fn slot_target(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Breakfast => self.slot_kcal[0],
            Slot::Lunch => self.slot_kcal[1],
            Slot::Dinner => self.slot_kcal[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BodyProfile {
        BodyProfile {
            age: 33,
            sex: Sex::Male,
            height_cm: 173.0,
            weight_kg: 70.0,
            goal_weight_kg: 65.0,
            days_to_goal: 60,
            activity: ActivityLevel::Light,
        }
    }

    #[test]
    fn test_slot_targets_sum_to_intake() {
        let split = SlotSplit {
            breakfast: 1.0 / 3.0,
            lunch: 1.0 / 3.0,
            dinner: 1.0 / 3.0,
        };
        let macros = MacroTargets {
            protein_g: 0.0,
            fat_g: 0.0,
            carb_g: 0.0,
        };
        let targets = TargetProfile::new(700, split, macros, 18.0).unwrap();
        assert_eq!(targets.slot_kcal, [233, 233, 234]);

        let targets = TargetProfile::new(1999, SlotSplit::default(), macros, 18.0).unwrap();
        assert_eq!(targets.slot_kcal.iter().sum::<u32>(), 1999);
        assert_eq!(targets.slot_kcal, [399, 799, 801]);
    }

    #[test]
    fn test_zero_intake_rejected() {
        let macros = MacroTargets {
            protein_g: 60.0,
            fat_g: 50.0,
            carb_g: 200.0,
        };
        assert!(matches!(
            TargetProfile::new(0, SlotSplit::default(), macros, 18.0),
            Err(DietError::Configuration(_))
        ));
    }

    #[test]
    fn test_tdee_and_intake() {
        let p = profile();
        // BMR = 88.362 + 937.79 + 830.227 - 187.341 = 1669.038; x1.375 = 2294.9
        assert_eq!(tdee_kcal(&p), 2294);

        let estimate = calc_target_intake(&p).unwrap();
        // 5 kg * 7700 / 60 = 641.67 kcal/day
        assert_eq!(estimate.deficit_per_day_kcal, 641);
        assert_eq!(estimate.intake_kcal, 1652);
    }

    #[test]
    fn test_intake_floor() {
        let mut p = profile();
        p.goal_weight_kg = 50.0;
        p.days_to_goal = 10;
        let estimate = calc_target_intake(&p).unwrap();
        assert_eq!(estimate.intake_kcal, MIN_INTAKE_KCAL);
    }

    #[test]
    fn test_no_deficit_when_goal_above_weight() {
        let mut p = profile();
        p.goal_weight_kg = 80.0;
        let estimate = calc_target_intake(&p).unwrap();
        assert_eq!(estimate.deficit_per_day_kcal, 0);
        assert_eq!(estimate.intake_kcal, estimate.tdee_kcal);
    }

    #[test]
    fn test_macro_targets() {
        let macros = MacroTargets::from_intake(2000, 70.0, &PlannerConfig::default());
        assert!((macros.protein_g - 112.0).abs() < 1e-9);
        assert!((macros.fat_g - 500.0 / 9.0).abs() < 1e-9);
        // 2000 - 448 - 500 = 1052 kcal of carbs
        assert!((macros.carb_g - 263.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_from_str() {
        assert_eq!(
            "very_active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert!("couch".parse::<ActivityLevel>().is_err());
    }
}
