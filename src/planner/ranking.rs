use crate::models::{Bundle, Item, Slot};

/// Order bundles by calorie distance to `target_kcal` (ties: cheaper first) and keep the
/// best `keep_top`.
///
/// The sort is stable, so bundles with equal keys keep their input order.
pub fn rank_candidates<'a>(
    mut combos: Vec<Bundle<'a>>,
    target_kcal: u32,
    keep_top: usize,
) -> Vec<Bundle<'a>> {
    let target = target_kcal as i64;
    combos.sort_by_key(|c| (c.kcal_distance(target), c.price()));
    combos.truncate(keep_top);
    combos
}

/// Indices of the `prefix` candidates closest to `remaining_kcal`, ties cheaper first.
///
/// Used to re-rank dinner per (breakfast, lunch) pair; the candidate list itself is left
/// untouched so it can be shared across pairs and threads.
pub fn closest_to_remaining(
    candidates: &[Bundle<'_>],
    remaining_kcal: i64,
    prefix: usize,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| {
        let c = &candidates[i];
        (c.kcal_distance(remaining_kcal), c.price())
    });
    order.truncate(prefix);
    order
}

/// Pre-trim a slot's catalog view before combination generation.
///
/// Items whose hint names the slot come before `any` items; within each group, items
/// closer to the slot's calorie target come first. Keeps at most `keep` items.
pub fn trim_catalog<'a>(items: &[&'a Item], slot: Slot, target_kcal: u32, keep: usize) -> Vec<&'a Item> {
    let target = target_kcal as i64;
    let mut trimmed = items.to_vec();
    trimmed.sort_by_key(|item| {
        (
            !item.slot_hint.is_exact(slot),
            (item.kcal as i64 - target).unsigned_abs(),
        )
    });
    trimmed.truncate(keep);
    trimmed
}
