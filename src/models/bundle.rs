use std::collections::BTreeSet;
use std::ops::Add;

use serde::Serialize;

use crate::models::Item;

/// Summed nutrition and price for a group of items.
///
/// `kcal` and `price` saturate at `u32::MAX` instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub kcal: u32,
    pub price: u32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
    pub fiber_g: f64,
}

impl Totals {
    pub fn of_item(item: &Item) -> Self {
        Self {
            kcal: item.kcal,
            price: item.price,
            protein_g: item.protein_g,
            fat_g: item.fat_g,
            carb_g: item.carb_g,
            fiber_g: item.fiber_g,
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            kcal: self.kcal.saturating_add(rhs.kcal),
            price: self.price.saturating_add(rhs.price),
            protein_g: self.protein_g + rhs.protein_g,
            fat_g: self.fat_g + rhs.fat_g,
            carb_g: self.carb_g + rhs.carb_g,
            fiber_g: self.fiber_g + rhs.fiber_g,
        }
    }
}

/// A priced, nutrition-aggregated group of distinct items for one slot.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle<'a> {
    pub items: Vec<&'a Item>,
    pub totals: Totals,
    #[serde(skip)]
    names: BTreeSet<&'a str>,
}

impl<'a> Bundle<'a> {
    pub fn new(items: Vec<&'a Item>) -> Self {
        let totals = items
            .iter()
            .map(|item| Totals::of_item(item))
            .fold(Totals::default(), Add::add);
        let names = items.iter().map(|item| item.name.as_str()).collect();
        Self {
            items,
            totals,
            names,
        }
    }

    #[inline]
    pub fn kcal(&self) -> u32 {
        self.totals.kcal
    }

    #[inline]
    pub fn price(&self) -> u32 {
        self.totals.price
    }

    /// Identity keys of the member items.
    pub fn names(&self) -> &BTreeSet<&'a str> {
        &self.names
    }

    /// True if no item appears in both bundles.
    #[inline]
    pub fn is_disjoint(&self, other: &Bundle<'_>) -> bool {
        self.names.is_disjoint(&other.names)
    }

    /// Absolute calorie distance to `target_kcal`.
    #[inline]
    pub fn kcal_distance(&self, target_kcal: i64) -> u64 {
        (self.kcal() as i64 - target_kcal).unsigned_abs()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotHint;

    fn item(name: &str, kcal: u32, price: u32, fiber: f64) -> Item {
        Item {
            name: name.to_string(),
            store: String::new(),
            category: String::new(),
            kcal,
            price,
            slot_hint: SlotHint::Any,
            protein_g: 1.0,
            fat_g: 2.0,
            carb_g: 3.0,
            fiber_g: fiber,
            url: None,
            image_url: None,
        }
    }

    #[test]
    fn test_bundle_totals() {
        let a = item("A", 200, 100, 1.5);
        let b = item("B", 350, 180, 0.5);
        let bundle = Bundle::new(vec![&a, &b]);

        assert_eq!(bundle.kcal(), 550);
        assert_eq!(bundle.price(), 280);
        assert!((bundle.totals.fiber_g - 2.0).abs() < 1e-9);
        assert!((bundle.totals.carb_g - 6.0).abs() < 1e-9);
        assert_eq!(bundle.names().len(), 2);
    }

    #[test]
    fn test_disjoint() {
        let a = item("A", 200, 100, 0.0);
        let b = item("B", 300, 100, 0.0);
        let c = item("C", 400, 100, 0.0);

        let ab = Bundle::new(vec![&a, &b]);
        let bc = Bundle::new(vec![&b, &c]);
        let c_only = Bundle::new(vec![&c]);

        assert!(!ab.is_disjoint(&bc));
        assert!(ab.is_disjoint(&c_only));
    }

    #[test]
    fn test_kcal_distance() {
        let a = item("A", 200, 100, 0.0);
        let bundle = Bundle::new(vec![&a]);
        assert_eq!(bundle.kcal_distance(250), 50);
        assert_eq!(bundle.kcal_distance(150), 50);
        assert_eq!(bundle.kcal_distance(-10), 210);
    }

    #[test]
    fn test_totals_saturate_instead_of_wrapping() {
        let a = item("A", u32::MAX, 1 << 31, 0.0);
        let b = item("B", 10, 1 << 31, 0.0);
        let bundle = Bundle::new(vec![&a, &b]);

        assert_eq!(bundle.price(), u32::MAX);
        assert_eq!(bundle.kcal(), u32::MAX);
    }
}
