use std::collections::{BTreeSet, HashMap};

use strsim::jaro_winkler;

use crate::error::{DietError, Result};
use crate::models::{Item, Slot};
use crate::planner::STORE_MATCH_THRESHOLD;
use crate::planner::pipeline::SlotViews;

/// A validated, name-unique set of items.
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Validate items and drop duplicate names.
    ///
    /// A later item with the same name replaces the earlier one in place, so catalog order
    /// (and therefore planning) stays deterministic.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut deduped: Vec<Item> = Vec::with_capacity(items.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for item in items {
            item.validate().map_err(|reason| DietError::InvalidItem {
                name: item.name.clone(),
                reason,
            })?;

            match positions.get(&item.name) {
                Some(&pos) => {
                    tracing::debug!(item = %item.debug_string(), "duplicate catalog item, keeping the later entry");
                    deduped[pos] = item;
                }
                None => {
                    positions.insert(item.name.clone(), deduped.len());
                    deduped.push(item);
                }
            }
        }

        Ok(Self { items: deduped })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Distinct store names, sorted.
    pub fn stores(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.store.trim().to_string())
            .filter(|store| !store.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Map a user-typed store name to a store in the catalog.
    ///
    /// Exact (case-insensitive) matches win; otherwise the closest Jaro-Winkler match
    /// above `STORE_MATCH_THRESHOLD` is accepted.
    pub fn resolve_store(&self, query: &str) -> Result<String> {
        let stores = self.stores();
        let wanted = query.trim().to_lowercase();

        if let Some(store) = stores.iter().find(|s| s.to_lowercase() == wanted) {
            return Ok(store.clone());
        }

        let best = stores
            .iter()
            .map(|s| (s, jaro_winkler(&s.to_lowercase(), &wanted)))
            .filter(|(_, score)| *score >= STORE_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((store, score)) => {
                tracing::info!(query, store = %store, score, "resolved store by fuzzy match");
                Ok(store.clone())
            }
            None => Err(DietError::StoreNotFound {
                query: query.to_string(),
                suggestions: stores,
            }),
        }
    }

    /// Items usable in `slot`, optionally restricted to one store.
    pub fn view(&self, slot: Slot, store: Option<&str>) -> Vec<&Item> {
        self.select(Some(slot), store)
    }

    /// Items usable in `slot` (every item when `None`), in catalog order.
    pub fn select(&self, slot: Option<Slot>, store: Option<&str>) -> Vec<&Item> {
        let store_key = store.map(|s| s.trim().to_lowercase());
        self.items
            .iter()
            .filter(|item| slot.is_none_or(|slot| item.slot_hint.fits(slot)))
            .filter(|item| match &store_key {
                Some(key) => item.store_key() == *key,
                None => true,
            })
            .collect()
    }

    /// One view per slot; each slot may draw from a different store.
    pub fn slot_views(&self, stores: [Option<&str>; 3]) -> SlotViews<'_> {
        let [breakfast, lunch, dinner] = stores;
        SlotViews {
            breakfast: self.view(Slot::Breakfast, breakfast),
            lunch: self.view(Slot::Lunch, lunch),
            dinner: self.view(Slot::Dinner, dinner),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
