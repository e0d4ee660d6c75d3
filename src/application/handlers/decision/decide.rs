//! DecideHandler - Command handler that picks and records today's dish.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::decision::{
    DecisionError, DecisionRecord, MenuItem, Outcome, WeightedSelection, RECENCY_WINDOW,
};
use crate::domain::foundation::{MenuItemId, UserId};
use crate::ports::{Clock, DecisionRepository, MenuCatalog};

/// Command to make a decision for a user.
#[derive(Debug, Clone)]
pub struct DecideCommand {
    pub user_id: UserId,
    /// Restricts the draw to these items; empty means the whole catalog.
    pub menu_ids: Vec<MenuItemId>,
}

/// Result of a successful decision.
#[derive(Debug, Clone)]
pub struct DecideResult {
    pub menu: MenuItem,
    pub outcome: Outcome,
    pub record: DecisionRecord,
}

impl DecideResult {
    pub fn message(&self) -> &'static str {
        self.outcome.message()
    }
}

/// Handler for decisions.
///
/// Owns the random generator used for draws. One handler serves all
/// concurrent requests; each draw takes the generator lock for the duration
/// of a single `gen_range` call and never across an await point.
pub struct DecideHandler {
    catalog: Arc<dyn MenuCatalog>,
    repository: Arc<dyn DecisionRepository>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
}

impl DecideHandler {
    pub fn new(
        catalog: Arc<dyn MenuCatalog>,
        repository: Arc<dyn DecisionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            repository,
            clock,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the entropy-seeded generator, e.g. with a seeded one in tests.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub async fn handle(&self, cmd: DecideCommand) -> Result<DecideResult, DecisionError> {
        // 1. Resolve candidates
        let candidates = self.resolve_candidates(&cmd.menu_ids).await?;

        // 2. Recency window, read before anything is written
        let recent = self
            .repository
            .recent_by_user(cmd.user_id, RECENCY_WINDOW)
            .await?;

        // 3. Weighted draw
        let selection = WeightedSelection::new(&candidates, &recent)?;
        let menu = self.draw(&selection).clone();

        // 4. Persist (atomic day upsert)
        let record = self
            .repository
            .record_decision(cmd.user_id, menu.id(), self.clock.now())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %cmd.user_id, error = %e, "Failed to record decision");
                DecisionError::from(e)
            })?;

        // 5. Message against the pre-decision recency window
        let outcome = Outcome::assess(menu.id(), &recent);

        tracing::info!(
            user_id = %cmd.user_id,
            menu_id = %menu.id(),
            dish = menu.dish_name(),
            candidates = candidates.len(),
            ?outcome,
            day = %record.decided_on(),
            "Decision made"
        );

        Ok(DecideResult {
            menu,
            outcome,
            record,
        })
    }

    async fn resolve_candidates(&self, menu_ids: &[MenuItemId]) -> Result<Vec<MenuItem>, DecisionError> {
        let candidates = if menu_ids.is_empty() {
            self.catalog.list_all().await?
        } else {
            let ids: Vec<MenuItemId> = menu_ids
                .iter()
                .copied()
                .filter(MenuItemId::is_resolvable)
                .collect();
            if ids.is_empty() {
                Vec::new()
            } else {
                self.catalog.list_by_ids(&ids).await?
            }
        };

        if candidates.is_empty() {
            tracing::warn!(requested = menu_ids.len(), "No menus available for decision");
            return Err(DecisionError::NoCandidates);
        }

        Ok(candidates)
    }

    fn draw<'a>(&self, selection: &WeightedSelection<'a>) -> &'a MenuItem {
        // A panic elsewhere cannot leave the generator in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        selection.draw(&mut *rng)
    }
}
