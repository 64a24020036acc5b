//! The per-turn planning loop.

use tracing::debug;

use crate::core::{GameplayConstants, RandomSource, TurnContext};
use crate::executor::MoveExecutor;
use crate::rules::BuildValidator;
use crate::visibility::VisibilityService;

use super::candidates::{choose_candidate, collect_candidates, Board};
use super::config::PlannerConfig;
use super::target::TargetSelector;

/// Plays a full turn for a computer-controlled faction.
///
/// Stateless between turns: everything it knows comes from the
/// `TurnContext` it is handed.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    validator: BuildValidator,
    visibility: VisibilityService,
    config: PlannerConfig,
    budget: u32,
}

impl Planner {
    /// Create a planner. The action budget is `constants.actions_per_turn`.
    #[must_use]
    pub fn new(constants: GameplayConstants, config: PlannerConfig) -> Self {
        Self {
            validator: BuildValidator::new(constants.clone()),
            visibility: VisibilityService::new(constants.clone()),
            config,
            budget: constants.actions_per_turn,
        }
    }

    /// Override the per-turn action budget.
    #[must_use]
    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    /// The heuristic parameters in use.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The per-turn action budget.
    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Spend the budget for `ctx.acting`, one capture at a time.
    ///
    /// Visibility and strategy are fixed at the start of the turn. `on_step`
    /// receives the remaining budget after each capture. A dead faction does
    /// nothing.
    pub fn take_turn<R: RandomSource>(
        &self,
        ctx: &mut TurnContext<'_>,
        rng: &mut R,
        mut on_step: impl FnMut(u32),
    ) {
        if !ctx.me().is_alive() {
            return;
        }

        let visible = self.visibility.visible_cells(ctx.me(), &*ctx.world);
        let strategy = TargetSelector::determine_strategy(
            ctx.acting,
            &*ctx.factions,
            &*ctx.world,
            &visible,
            rng,
            &self.config,
        );

        let mut remaining = self.budget;
        while remaining > 0 {
            let board = Board {
                me: ctx.acting,
                factions: &*ctx.factions,
                world: &*ctx.world,
                visible: &visible,
            };
            let candidates = collect_candidates(
                &board,
                &self.validator,
                ctx.flags,
                &ctx.ledger.mountain_discounts,
                remaining,
            );
            let Some((choice, score)) = choose_candidate(&candidates, strategy, &board, rng, &self.config)
            else {
                break;
            };

            MoveExecutor::apply(choice.coord, &choice.result, ctx);
            remaining = remaining.saturating_sub(choice.result.spend());

            debug!(
                faction = %ctx.me().name,
                target = %choice.coord,
                score,
                remaining,
                "planner move"
            );
            on_step(remaining);
        }
    }
}
