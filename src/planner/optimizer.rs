use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::{DietError, Result};
use crate::models::{Bundle, Plan};
use crate::planner::config::{Execution, PlannerConfig};
use crate::planner::ranking::closest_to_remaining;
use crate::planner::scoring::score_plan;
use crate::planner::targets::TargetProfile;

/// Cooperative stop signal for a running search.
///
/// Checked before each breakfast candidate. Clone the flag from `cancel_flag` to stop a
/// search from another thread. A candidate limit counts across clones, so use a fresh
/// control per search.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
    candidate_limit: Option<usize>,
    started: Arc<AtomicUsize>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            ..Self::default()
        }
    }

    /// Stop after `limit` breakfast candidates have been started.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = Some(limit);
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, AtomicOrdering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.cancelled.load(AtomicOrdering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Claim the next breakfast candidate, or `false` if the search must stop.
    fn begin_candidate(&self) -> bool {
        if self.should_stop() {
            return false;
        }
        match self.candidate_limit {
            Some(limit) => self.started.fetch_add(1, AtomicOrdering::Relaxed) < limit,
            None => true,
        }
    }
}

/// Result of a search: the best plan, and whether every candidate was examined.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub plan: Plan<'a>,
    pub complete: bool,
    pub pairs_examined: usize,
}

/// A feasible (breakfast, lunch, dinner) choice by index.
#[derive(Debug, Clone, Copy)]
struct Found {
    score: f64,
    price: u64,
    breakfast: usize,
    lunch: usize,
    /// Position in the dinner order re-ranked for this pair.
    dinner_rank: usize,
    dinner: usize,
}

impl Found {
    /// Lower score wins, then lower price, then the choice visited first.
    fn cmp_key(&self, other: &Found) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.price.cmp(&other.price))
            .then(self.breakfast.cmp(&other.breakfast))
            .then(self.lunch.cmp(&other.lunch))
            .then(self.dinner_rank.cmp(&other.dinner_rank))
    }
}

/// Best choice and bookkeeping for some slice of the breakfast candidates.
#[derive(Debug, Clone, Copy, Default)]
struct Partial {
    best: Option<Found>,
    pairs: usize,
    skipped: usize,
}

impl Partial {
    fn offer(&mut self, found: Found) {
        match self.best {
            Some(best) if best.cmp_key(&found) != Ordering::Greater => {}
            _ => self.best = Some(found),
        }
    }

    fn merge(mut self, other: Partial) -> Partial {
        if let Some(found) = other.best {
            self.offer(found);
        }
        self.pairs += other.pairs;
        self.skipped += other.skipped;
        self
    }
}

struct Search<'s, 'a> {
    breakfast: &'s [Bundle<'a>],
    lunch: &'s [Bundle<'a>],
    dinner: &'s [Bundle<'a>],
    targets: &'s TargetProfile,
    daily_budget: u32,
    config: &'s PlannerConfig,
}

impl Search<'_, '_> {
    /// Every lunch and re-ranked dinner for one breakfast candidate.
    fn for_breakfast(&self, bi: usize) -> Partial {
        let cb = &self.breakfast[bi];
        let mut partial = Partial::default();

        for (li, cl) in self.lunch.iter().enumerate() {
            if !cb.is_disjoint(cl) {
                continue;
            }
            let price_bl = u64::from(cb.price()) + u64::from(cl.price());
            if price_bl > u64::from(self.daily_budget) {
                continue;
            }
            partial.pairs += 1;

            let totals_bl = cb.totals + cl.totals;
            let remaining = self.targets.intake_kcal as i64 - totals_bl.kcal as i64;
            let order = closest_to_remaining(self.dinner, remaining, self.config.dinner_prefix);

            for (rank, &di) in order.iter().enumerate() {
                let cd = &self.dinner[di];
                if !cd.is_disjoint(cb) || !cd.is_disjoint(cl) {
                    continue;
                }
                let price = price_bl + u64::from(cd.price());
                if price > u64::from(self.daily_budget) {
                    continue;
                }
                let totals = totals_bl + cd.totals;
                partial.offer(Found {
                    score: score_plan(&totals, self.targets, self.config),
                    price,
                    breakfast: bi,
                    lunch: li,
                    dinner_rank: rank,
                    dinner: di,
                });
            }
        }

        partial
    }

    fn run_sequential(&self, control: &SearchControl) -> Partial {
        let mut acc = Partial::default();
        for bi in 0..self.breakfast.len() {
            if !control.begin_candidate() {
                acc.skipped = self.breakfast.len() - bi;
                break;
            }
            acc = acc.merge(self.for_breakfast(bi));
        }
        acc
    }

    fn run_parallel(&self, control: &SearchControl) -> Partial {
        (0..self.breakfast.len())
            .into_par_iter()
            .map(|bi| {
                if !control.begin_candidate() {
                    Partial {
                        skipped: 1,
                        ..Partial::default()
                    }
                } else {
                    self.for_breakfast(bi)
                }
            })
            .reduce(Partial::default, Partial::merge)
    }
}

/// Pick the best-scoring, affordable, item-disjoint (breakfast, lunch, dinner) plan.
///
/// Candidates are expected to come from `rank_candidates`. Dinner is re-ranked per
/// (breakfast, lunch) pair against the calories that pair leaves, and only the closest
/// `config.dinner_prefix` are scored.
pub fn optimize<'a>(
    breakfast: &[Bundle<'a>],
    lunch: &[Bundle<'a>],
    dinner: &[Bundle<'a>],
    targets: &TargetProfile,
    daily_budget: u32,
    config: &PlannerConfig,
) -> Result<Plan<'a>> {
    optimize_with_control(
        breakfast,
        lunch,
        dinner,
        targets,
        daily_budget,
        config,
        &SearchControl::default(),
    )
    .map(|outcome| outcome.plan)
}

/// Like `optimize`, stopping early when `control` says so.
///
/// A stopped search returns the best plan found so far with `complete == false`, or
/// `NoFeasiblePlan` if none was found yet.
pub fn optimize_with_control<'a>(
    breakfast: &[Bundle<'a>],
    lunch: &[Bundle<'a>],
    dinner: &[Bundle<'a>],
    targets: &TargetProfile,
    daily_budget: u32,
    config: &PlannerConfig,
    control: &SearchControl,
) -> Result<SearchOutcome<'a>> {
    config.validate()?;

    tracing::debug!(
        breakfast = breakfast.len(),
        lunch = lunch.len(),
        dinner = dinner.len(),
        dinner_prefix = config.dinner_prefix,
        budget = daily_budget,
        execution = ?config.execution,
        "starting tri-slot search"
    );

    let search = Search {
        breakfast,
        lunch,
        dinner,
        targets,
        daily_budget,
        config,
    };

    let started = Instant::now();
    let result = match config.execution {
        Execution::Sequential => search.run_sequential(control),
        Execution::Parallel => search.run_parallel(control),
    };
    let complete = result.skipped == 0;

    if !complete {
        tracing::warn!(
            skipped = result.skipped,
            "search stopped early, returning best plan found so far"
        );
    }

    let Some(found) = result.best else {
        tracing::info!(
            pairs = result.pairs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "no feasible plan"
        );
        return Err(DietError::NoFeasiblePlan);
    };

    tracing::info!(
        score = found.score,
        price = found.price,
        pairs = result.pairs,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "best plan selected"
    );

    Ok(SearchOutcome {
        plan: Plan::new(
            breakfast[found.breakfast].clone(),
            lunch[found.lunch].clone(),
            dinner[found.dinner].clone(),
            found.score,
        ),
        complete,
        pairs_examined: result.pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, SlotHint};
    use crate::planner::config::SlotSplit;
    use crate::planner::targets::MacroTargets;

    fn item(name: &str, kcal: u32, price: u32) -> Item {
        Item {
            name: name.to_string(),
            store: String::new(),
            category: String::new(),
            kcal,
            price,
            slot_hint: SlotHint::Any,
            protein_g: 10.0,
            fat_g: 5.0,
            carb_g: 30.0,
            fiber_g: 2.0,
            url: None,
            image_url: None,
        }
    }

    fn targets(intake: u32) -> TargetProfile {
        TargetProfile::new(
            intake,
            SlotSplit::default(),
            MacroTargets {
                protein_g: 30.0,
                fat_g: 15.0,
                carb_g: 90.0,
            },
            6.0,
        )
        .unwrap()
    }

    #[test]
    fn test_tie_on_score_prefers_cheaper() {
        let a = item("A", 300, 100);
        let b = item("B", 300, 100);
        let c1 = item("C1", 400, 300);
        let c2 = item("C2", 400, 200);
        let bs = vec![Bundle::new(vec![&a])];
        let ls = vec![Bundle::new(vec![&b])];
        let ds = vec![Bundle::new(vec![&c1]), Bundle::new(vec![&c2])];

        let plan = optimize(&bs, &ls, &ds, &targets(1000), 1000, &PlannerConfig::default()).unwrap();
        assert_eq!(plan.dinner.items[0].name, "C2");
        assert_eq!(plan.totals.price, 400);
    }

    #[test]
    fn test_overlapping_pair_rejected() {
        let a = item("A", 300, 100);
        let b = item("B", 300, 100);
        let c = item("C", 400, 100);
        // Lunch reuses breakfast's item; the only disjoint choice is A / B / C.
        let bs = vec![Bundle::new(vec![&a])];
        let ls = vec![Bundle::new(vec![&a]), Bundle::new(vec![&b])];
        let ds = vec![Bundle::new(vec![&b]), Bundle::new(vec![&c])];

        let plan = optimize(&bs, &ls, &ds, &targets(1000), 1000, &PlannerConfig::default()).unwrap();
        assert_eq!(plan.lunch.items[0].name, "B");
        assert_eq!(plan.dinner.items[0].name, "C");
    }

    #[test]
    fn test_empty_candidates_is_infeasible() {
        let a = item("A", 300, 100);
        let bs = vec![Bundle::new(vec![&a])];
        let result = optimize(&bs, &[], &[], &targets(1000), 1000, &PlannerConfig::default());
        assert!(matches!(result, Err(DietError::NoFeasiblePlan)));
    }

    #[test]
    fn test_cancelled_search_returns_nothing() {
        let a = item("A", 300, 100);
        let b = item("B", 300, 100);
        let c = item("C", 400, 100);
        let bs = vec![Bundle::new(vec![&a])];
        let ls = vec![Bundle::new(vec![&b])];
        let ds = vec![Bundle::new(vec![&c])];

        let control = SearchControl::new();
        control.cancel();
        let result = optimize_with_control(
            &bs,
            &ls,
            &ds,
            &targets(1000),
            1000,
            &PlannerConfig::default(),
            &control,
        );
        assert!(matches!(result, Err(DietError::NoFeasiblePlan)));
    }

    #[test]
    fn test_day_price_over_u32_is_unaffordable() {
        let a = item("A", 300, 1 << 31);
        let b = item("B", 300, 1 << 31);
        let c = item("C", 400, 0);
        let bs = vec![Bundle::new(vec![&a])];
        let ls = vec![Bundle::new(vec![&b])];
        let ds = vec![Bundle::new(vec![&c])];

        let result = optimize(&bs, &ls, &ds, &targets(1000), u32::MAX, &PlannerConfig::default());
        assert!(matches!(result, Err(DietError::NoFeasiblePlan)));
    }

    #[test]
    fn test_candidate_limit_stops_both_backends() {
        let breakfast_items: Vec<Item> = (0..4)
            .map(|i| item(&format!("B{}", i), 300 + i * 10, 100))
            .collect();
        let l = item("L", 300, 100);
        let d = item("D", 400, 100);
        let bs: Vec<Bundle> = breakfast_items.iter().map(|i| Bundle::new(vec![i])).collect();
        let ls = vec![Bundle::new(vec![&l])];
        let ds = vec![Bundle::new(vec![&d])];

        for execution in [Execution::Sequential, Execution::Parallel] {
            let config = PlannerConfig {
                execution,
                ..Default::default()
            };
            let control = SearchControl::new().with_candidate_limit(1);
            let outcome =
                optimize_with_control(&bs, &ls, &ds, &targets(1000), 1000, &config, &control)
                    .unwrap();

            assert!(!outcome.complete);
            assert_eq!(outcome.pairs_examined, 1);
            assert_eq!(outcome.plan.totals.price, 300);
        }

        let config = PlannerConfig::default();
        let control = SearchControl::new().with_candidate_limit(4);
        let outcome =
            optimize_with_control(&bs, &ls, &ds, &targets(1000), 1000, &config, &control).unwrap();
        assert!(outcome.complete);
        assert_eq!(outcome.pairs_examined, 4);
        assert_eq!(outcome.plan.breakfast.items[0].name, "B0");
    }

    #[test]
    fn test_partial_prefers_earlier_on_full_tie() {
        let first = Found {
            score: 1.0,
            price: 100,
            breakfast: 0,
            lunch: 1,
            dinner_rank: 0,
            dinner: 3,
        };
        let later = Found {
            lunch: 2,
            ..first
        };

        let mut partial = Partial::default();
        partial.offer(later);
        partial.offer(first);
        assert_eq!(partial.best.unwrap().lunch, 1);

        let merged = Partial::default().merge(partial);
        assert_eq!(merged.best.unwrap().lunch, 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let config = PlannerConfig {
            dinner_prefix: 0,
            ..Default::default()
        };
        let result = optimize(&[], &[], &[], &targets(1000), 1000, &config);
        assert!(matches!(result, Err(DietError::Configuration(_))));
    }
}
