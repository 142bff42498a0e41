use crate::models::{Bundle, Item};

/// Every non-empty combination of up to `max_items` distinct items whose total price fits
/// within `budget`.
///
/// Combinations are produced smallest first, each size in lexicographic index order, so
/// the output order is a pure function of the input order. Growth is `C(n, r)`; callers are
/// expected to trim `items` to a few dozen entries first.
pub fn generate_combos<'a>(items: &[&'a Item], budget: u32, max_items: usize) -> Vec<Bundle<'a>> {
    let n = items.len();
    let max_r = max_items.min(n);
    let mut combos = Vec::new();

    for r in 1..=max_r {
        let mut idx: Vec<usize> = (0..r).collect();
        loop {
            let price: u64 = idx.iter().map(|&i| u64::from(items[i].price)).sum();
            if price <= u64::from(budget) {
                combos.push(Bundle::new(idx.iter().map(|&i| items[i]).collect()));
            }

            // Advance to the next combination: bump the rightmost index that still has room.
            let Some(pos) = (0..r).rev().find(|&pos| idx[pos] < n - r + pos) else {
                break;
            };
            idx[pos] += 1;
            for next in pos + 1..r {
                idx[next] = idx[next - 1] + 1;
            }
        }
    }

    combos
}

/// Number of combinations `generate_combos` considers before the budget filter.
pub fn combo_count(n: usize, max_items: usize) -> u64 {
    (1..=max_items.min(n)).map(|r| choose(n as u64, r as u64)).sum()
}

fn choose(n: u64, r: u64) -> u64 {
    let r = r.min(n - r);
    (0..r).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotHint;

    fn item(name: &str, kcal: u32, price: u32) -> Item {
        Item {
            name: name.to_string(),
            store: String::new(),
            category: String::new(),
            kcal,
            price,
            slot_hint: SlotHint::Any,
            protein_g: 0.0,
            fat_g: 0.0,
            carb_g: 0.0,
            fiber_g: 0.0,
            url: None,
            image_url: None,
        }
    }

    #[test]
    fn test_count_matches_binomial_sum() {
        let items: Vec<Item> = (0..6)
            .map(|i| item(&format!("I{}", i), 100 + i, 10))
            .collect();
        let refs: Vec<&Item> = items.iter().collect();

        let combos = generate_combos(&refs, u32::MAX, 3);
        // 6 + 15 + 20
        assert_eq!(combos.len(), 41);
        assert_eq!(combo_count(6, 3), 41);
    }

    #[test]
    fn test_max_items_capped_by_item_count() {
        let items = vec![item("A", 100, 10), item("B", 200, 10)];
        let refs: Vec<&Item> = items.iter().collect();

        let combos = generate_combos(&refs, 1000, 5);
        assert_eq!(combos.len(), 3);
        assert_eq!(combo_count(2, 5), 3);
    }

    #[test]
    fn test_budget_filter_inclusive() {
        let items = vec![item("A", 100, 100), item("B", 200, 150), item("C", 300, 400)];
        let refs: Vec<&Item> = items.iter().collect();

        let combos = generate_combos(&refs, 250, 3);
        let prices: Vec<u32> = combos.iter().map(|c| c.price()).collect();
        // A, B, A+B (exactly 250)
        assert_eq!(prices, vec![100, 150, 250]);
    }

    #[test]
    fn test_lexicographic_order() {
        let items = vec![item("A", 1, 0), item("B", 2, 0), item("C", 3, 0)];
        let refs: Vec<&Item> = items.iter().collect();

        let combos = generate_combos(&refs, 0, 2);
        let names: Vec<Vec<&str>> = combos
            .iter()
            .map(|c| c.items.iter().map(|i| i.name.as_str()).collect())
            .collect();
        assert_eq!(
            names,
            vec![
                vec!["A"],
                vec!["B"],
                vec!["C"],
                vec!["A", "B"],
                vec!["A", "C"],
                vec!["B", "C"],
            ]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let refs: Vec<&Item> = Vec::new();
        assert!(generate_combos(&refs, 1000, 3).is_empty());

        let items = vec![item("A", 100, 500)];
        let refs: Vec<&Item> = items.iter().collect();
        assert!(generate_combos(&refs, 499, 3).is_empty());
    }

    #[test]
    fn test_huge_prices_never_wrap_under_budget() {
        let items = vec![item("A", 100, 1 << 31), item("B", 100, 1 << 31)];
        let refs: Vec<&Item> = items.iter().collect();

        assert!(generate_combos(&refs, 100, 2).is_empty());

        let combos = generate_combos(&refs, u32::MAX, 2);
        let prices: Vec<u32> = combos.iter().map(|c| c.price()).collect();
        // The pair costs 2^32 and is one yen over the largest budget.
        assert_eq!(prices, vec![1 << 31, 1 << 31]);
    }
}
