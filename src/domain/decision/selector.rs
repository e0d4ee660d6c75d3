//! Recency-penalizing weighted random selection.
//!
//! Every candidate starts at weight [`FRESH_WEIGHT`]. A candidate whose id
//! appears anywhere in the user's recent decisions drops to
//! [`RECENT_WEIGHT`], no matter how often it appears there. One uniform draw
//! `r` in `[0, total)` then walks the candidates in their given order and
//! returns the first whose running weight sum reaches `r`, so ties go to the
//! earlier candidate.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::foundation::MenuItemId;

use super::{DecisionError, DecisionRecord, MenuItem};

/// Weight of a candidate the user has not chosen recently.
pub const FRESH_WEIGHT: f64 = 1.0;

/// Weight of a candidate found in the recency window.
pub const RECENT_WEIGHT: f64 = 0.5;

/// Number of most recent decisions consulted when weighting.
pub const RECENCY_WINDOW: usize = 3;

/// Candidates paired with their weights, ready for a draw.
#[derive(Debug, Clone)]
pub struct WeightedSelection<'a> {
    candidates: &'a [MenuItem],
    weights: Vec<f64>,
    total: f64,
}

impl<'a> WeightedSelection<'a> {
    /// Weighs `candidates` against the recency list.
    ///
    /// # Errors
    ///
    /// - `NoCandidates` if `candidates` is empty
    pub fn new(candidates: &'a [MenuItem], recent: &[DecisionRecord]) -> Result<Self, DecisionError> {
        if candidates.is_empty() {
            return Err(DecisionError::NoCandidates);
        }

        let recent_ids: HashSet<MenuItemId> = recent.iter().map(DecisionRecord::menu_id).collect();

        let weights: Vec<f64> = candidates
            .iter()
            .map(|item| {
                if recent_ids.contains(&item.id()) {
                    RECENT_WEIGHT
                } else {
                    FRESH_WEIGHT
                }
            })
            .collect();
        let total = weights.iter().sum();

        Ok(Self {
            candidates,
            weights,
            total,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Expected selection probability of each candidate.
    pub fn probabilities(&self) -> Vec<f64> {
        self.weights.iter().map(|w| w / self.total).collect()
    }

    /// Resolves a draw `r` in `[0, total)` to a candidate.
    pub fn pick(&self, r: f64) -> &'a MenuItem {
        let mut cumulative = 0.0;
        for (item, weight) in self.candidates.iter().zip(&self.weights) {
            cumulative += weight;
            if cumulative >= r {
                return item;
            }
        }

        // Rounding fallback; the loop above always returns for r < total.
        &self.candidates[self.candidates.len() - 1]
    }

    /// Draws once from `rng` and resolves the draw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a MenuItem {
        self.pick(rng.gen_range(0.0..self.total))
    }
}

/// Selects one candidate with a single draw from `rng`.
///
/// # Errors
///
/// - `NoCandidates` if `candidates` is empty
pub fn select<'a, R: Rng + ?Sized>(
    candidates: &'a [MenuItem],
    recent: &[DecisionRecord],
    rng: &mut R,
) -> Result<&'a MenuItem, DecisionError> {
    Ok(WeightedSelection::new(candidates, recent)?.draw(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{CivilCalendar, RestaurantRef};
    use crate::domain::foundation::{RestaurantId, Timestamp, UserId};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn menu(ids: &[i64]) -> Vec<MenuItem> {
        ids.iter()
            .map(|id| {
                MenuItem::new(
                    MenuItemId::new(*id),
                    format!("菜品{}", id),
                    RestaurantRef::new(RestaurantId::new(1), "食堂"),
                )
            })
            .collect()
    }

    fn recent(ids: &[i64]) -> Vec<DecisionRecord> {
        let calendar = CivilCalendar::utc();
        let now = Timestamp::now();
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                DecisionRecord::new(
                    UserId::new(1).unwrap(),
                    MenuItemId::new(*id),
                    now.minus_days(i as i64 + 1),
                    &calendar,
                )
            })
            .collect()
    }

    fn frequencies(candidates: &[MenuItem], recent: &[DecisionRecord], trials: usize) -> HashMap<i64, f64> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for _ in 0..trials {
            let picked = select(candidates, recent, &mut rng).unwrap();
            *counts.entry(picked.id().value()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(id, n)| (id, n as f64 / trials as f64))
            .collect()
    }

    #[test]
    fn empty_candidates_fail() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select(&[], &recent(&[1]), &mut rng);
        assert_eq!(result.unwrap_err(), DecisionError::NoCandidates);
    }

    #[test]
    fn weights_halve_recent_items_once() {
        let candidates = menu(&[1, 2, 3]);
        let recent = recent(&[1, 1, 1]);
        let selection = WeightedSelection::new(&candidates, &recent).unwrap();

        assert_eq!(selection.weights(), &[0.5, 1.0, 1.0]);
        assert_eq!(selection.total_weight(), 2.5);
    }

    #[test]
    fn recent_items_outside_candidates_are_ignored() {
        let candidates = menu(&[1, 2]);
        let selection = WeightedSelection::new(&candidates, &recent(&[9, 8])).unwrap();
        assert_eq!(selection.weights(), &[1.0, 1.0]);
    }

    #[test]
    fn pick_walks_cumulative_weights() {
        let candidates = menu(&[1, 2, 3]);
        let recent = recent(&[2]);
        let selection = WeightedSelection::new(&candidates, &recent).unwrap();
        // cumulative: 1.0, 1.5, 2.5

        assert_eq!(selection.pick(0.0).id().value(), 1);
        assert_eq!(selection.pick(1.0).id().value(), 1);
        assert_eq!(selection.pick(1.2).id().value(), 2);
        assert_eq!(selection.pick(1.5).id().value(), 2);
        assert_eq!(selection.pick(2.49).id().value(), 3);
    }

    #[test]
    fn pick_falls_back_to_last_candidate() {
        let candidates = menu(&[1, 2]);
        let selection = WeightedSelection::new(&candidates, &[]).unwrap();
        assert_eq!(selection.pick(f64::MAX).id().value(), 2);
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let candidates = menu(&[7]);
        let recent = recent(&[7]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(select(&candidates, &recent, &mut rng).unwrap().id().value(), 7);
        }
    }

    #[test]
    fn uniform_without_recent_decisions() {
        let candidates = menu(&[1, 2, 3]);
        let freq = frequencies(&candidates, &[], 10_000);

        for id in [1, 2, 3] {
            let f = freq.get(&id).copied().unwrap_or(0.0);
            assert!((f - 1.0 / 3.0).abs() < 0.05, "item {} frequency {}", id, f);
        }
    }

    #[test]
    fn recent_item_is_chosen_less_often() {
        let candidates = menu(&[1, 2, 3]);
        let recent = recent(&[1]);
        let freq = frequencies(&candidates, &recent, 20_000);

        let penalized = freq[&1];
        assert!(penalized < freq[&2]);
        assert!(penalized < freq[&3]);
        // 0.5 / 2.5
        assert!((penalized - 0.2).abs() < 0.02, "frequency {}", penalized);
    }

    #[test]
    fn probabilities_match_weight_shares() {
        let candidates = menu(&[1, 2, 3, 4]);
        let recent = recent(&[2, 4]);
        let selection = WeightedSelection::new(&candidates, &recent).unwrap();

        let probs = selection.probabilities();
        assert_eq!(probs, vec![1.0 / 3.0, 1.0 / 6.0, 1.0 / 3.0, 1.0 / 6.0]);
    }

    proptest! {
        #[test]
        fn pick_always_returns_a_candidate(
            n in 1usize..12,
            recent_ids in proptest::collection::vec(1i64..15, 0..=RECENCY_WINDOW),
            fraction in 0.0f64..1.0,
        ) {
            let ids: Vec<i64> = (1..=n as i64).collect();
            let candidates = menu(&ids);
            let recent = recent(&recent_ids);
            let selection = WeightedSelection::new(&candidates, &recent).unwrap();

            let picked = selection.pick(fraction * selection.total_weight());
            prop_assert!(candidates.iter().any(|c| c.id() == picked.id()));
        }

        #[test]
        fn weights_are_fresh_or_recent(
            n in 1usize..12,
            recent_ids in proptest::collection::vec(1i64..15, 0..=RECENCY_WINDOW),
        ) {
            let ids: Vec<i64> = (1..=n as i64).collect();
            let candidates = menu(&ids);
            let recent = recent(&recent_ids);
            let selection = WeightedSelection::new(&candidates, &recent).unwrap();

            for (item, weight) in candidates.iter().zip(selection.weights()) {
                let expected = if recent_ids.contains(&item.id().value()) { RECENT_WEIGHT } else { FRESH_WEIGHT };
                prop_assert_eq!(*weight, expected);
            }
        }

        #[test]
        fn larger_draws_never_move_backwards(
            n in 1usize..12,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let ids: Vec<i64> = (1..=n as i64).collect();
            let candidates = menu(&ids);
            let selection = WeightedSelection::new(&candidates, &[]).unwrap();
            let total = selection.total_weight();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let lo_id = selection.pick(lo * total).id();
            let hi_id = selection.pick(hi * total).id();
            prop_assert!(lo_id <= hi_id);
        }
    }
}
