use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three daily meal periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "b" => Ok(Slot::Breakfast),
            "lunch" | "l" => Ok(Slot::Lunch),
            "dinner" | "d" => Ok(Slot::Dinner),
            other => Err(format!("unknown meal slot '{}'", other)),
        }
    }
}

/// Catalog-side slot affinity: a specific slot, or usable anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotHint {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Any,
}

impl SlotHint {
    /// Whether an item with this hint may be served in `slot`.
    #[inline]
    pub fn fits(&self, slot: Slot) -> bool {
        self.is_exact(slot) || *self == SlotHint::Any
    }

    /// Whether the hint names `slot` itself (not `any`).
    #[inline]
    pub fn is_exact(&self, slot: Slot) -> bool {
        matches!(
            (self, slot),
            (SlotHint::Breakfast, Slot::Breakfast)
                | (SlotHint::Lunch, Slot::Lunch)
                | (SlotHint::Dinner, Slot::Dinner)
        )
    }
}

/// A catalog item with nutrition facts and price.
///
/// `name` is the identity key: two items with the same name are the same product, and the
/// optimizer never places one product in two slots of a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    #[serde(default)]
    pub store: String,

    #[serde(default)]
    pub category: String,

    /// Energy in kcal.
    #[serde(default)]
    pub kcal: u32,

    /// Price in yen.
    #[serde(rename = "price_jpy", alias = "price", default)]
    pub price: u32,

    #[serde(rename = "meal_slot_hint", alias = "slot_hint", default)]
    pub slot_hint: SlotHint,

    /// Protein in grams.
    #[serde(default)]
    pub protein_g: f64,

    /// Fat in grams.
    #[serde(default)]
    pub fat_g: f64,

    /// Carbohydrate in grams.
    #[serde(default)]
    pub carb_g: f64,

    /// Dietary fiber in grams.
    #[serde(default)]
    pub fiber_g: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Item {
    /// Checks the invariants the optimizer relies on.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        for (label, value) in [
            ("protein_g", self.protein_g),
            ("fat_g", self.fat_g),
            ("carb_g", self.carb_g),
            ("fiber_g", self.fiber_g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", label, value));
            }
        }
        Ok(())
    }

    /// Canonical store key for lookups (lowercase, trimmed).
    pub fn store_key(&self) -> String {
        self.store.trim().to_lowercase()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} kcal, ¥{}, P:{} F:{} C:{} Fiber:{}",
            self.name,
            self.store,
            self.kcal,
            self.price,
            self.protein_g,
            self.fat_g,
            self.carb_g,
            self.fiber_g
        )
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
