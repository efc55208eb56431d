use log::trace;

use crate::game::base_evaluator::BaseEvaluator;
use crate::game::line_checks::LineCheck;
use crate::model::{CellId, ConstraintRegistry, EvaluationMode, Grid};

/// Everything a feasibility question is asked against. Built per call site;
/// holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub grid: &'a Grid,
    pub registry: &'a ConstraintRegistry,
    pub base: &'a dyn BaseEvaluator,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(grid: &'a Grid, registry: &'a ConstraintRegistry, base: &'a dyn BaseEvaluator) -> Self {
        Self {
            grid,
            registry,
            base,
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn is_candidate_possible(&self, n: u8, cell: CellId, mode: EvaluationMode) -> bool {
        is_candidate_possible(self, n, cell, mode)
    }

    /// Bit `n - 1` is set for every feasible digit `n`.
    pub fn candidate_mask(&self, cell: CellId, mode: EvaluationMode) -> u32 {
        (1..=self.size() as u8)
            .filter(|&n| self.is_candidate_possible(n, cell, mode))
            .fold(0u32, |mask, n| mask | 1 << (n - 1))
    }

    pub fn candidates(&self, cell: CellId, mode: EvaluationMode) -> Vec<u8> {
        (1..=self.size() as u8)
            .filter(|&n| self.is_candidate_possible(n, cell, mode))
            .collect()
    }
}

/// Can digit `n` still go in `cell`?
///
/// In interactive mode a filled cell only admits its own value. Otherwise the
/// base evaluator is asked first, and then every registered line constraint;
/// the first objection wins.
pub fn is_candidate_possible(ctx: &EvaluationContext<'_>, n: u8, cell: CellId, mode: EvaluationMode) -> bool {
    let value = ctx.grid.value(cell);
    if !mode.is_brute_force() && value != 0 {
        return value == n;
    }

    if !ctx.base.is_candidate_possible(ctx.grid, n, cell, mode) {
        return false;
    }

    let result = ctx
        .registry
        .iter()
        .all(|constraint| constraint.check(ctx, n, cell, mode));
    if !result {
        trace!(target: "evaluator", "{} ruled out of {:?} ({:?})", n, cell, mode);
    }
    result
}
