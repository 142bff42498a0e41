use serde::Serialize;

use crate::models::{Bundle, Slot, Totals};

/// A one-day plan: one bundle per slot, day totals, and the score (lower is better).
#[derive(Debug, Clone, Serialize)]
pub struct Plan<'a> {
    pub breakfast: Bundle<'a>,
    pub lunch: Bundle<'a>,
    pub dinner: Bundle<'a>,
    pub totals: Totals,
    pub score: f64,
}

impl<'a> Plan<'a> {
    pub fn new(breakfast: Bundle<'a>, lunch: Bundle<'a>, dinner: Bundle<'a>, score: f64) -> Self {
        let totals = breakfast.totals + lunch.totals + dinner.totals;
        Self {
            breakfast,
            lunch,
            dinner,
            totals,
            score,
        }
    }

    pub fn bundle(&self, slot: Slot) -> &Bundle<'a> {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
        }
    }

    /// Calorie delta against the day's intake target (positive = over).
    pub fn kcal_delta(&self, intake_kcal: u32) -> i64 {
        self.totals.kcal as i64 - intake_kcal as i64
    }
}
