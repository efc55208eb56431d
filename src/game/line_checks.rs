use itertools::Itertools;
use log::trace;

use crate::game::EvaluationContext;
use crate::model::{CellId, EvaluationMode, Grid, Line, LineConstraint, Lockout, Renban, Whispers};

/// A constraint family's say on whether `n` may go in `cell`. Checks only
/// ever narrow: returning `true` means "no objection", never "allowed".
pub trait LineCheck {
    fn check(&self, ctx: &EvaluationContext<'_>, n: u8, cell: CellId, mode: EvaluationMode) -> bool;
}

/// Lines of `lines` passing through `cell`, with the cell's position on each.
fn lines_through(lines: &[Line], cell: CellId) -> impl Iterator<Item = (&Line, usize)> {
    lines
        .iter()
        .filter_map(move |line| line.iter().position(|&c| c == cell).map(|index| (line, index)))
}

impl LineCheck for Renban {
    fn check(&self, ctx: &EvaluationContext<'_>, n: u8, cell: CellId, _mode: EvaluationMode) -> bool {
        lines_through(self.lines(), cell).all(|(line, _)| renban_line_allows(ctx.grid, line, n, cell))
    }
}

fn renban_line_allows(grid: &Grid, line: &Line, n: u8, cell: CellId) -> bool {
    if line.iter().any(|&other| other != cell && grid.value(other) == n) {
        trace!(target: "evaluator", "Renban: {} already on line through {:?}", n, cell);
        return false;
    }

    let span = line.len() as i32 - 1;
    let n = n as i32;
    let filled = line.iter().map(|&c| grid.value(c)).filter(|&v| v != 0);
    match filled.minmax().into_option() {
        Some((min, max)) if n - min as i32 > span || max as i32 - n > span => {
            trace!(
                target: "evaluator",
                "Renban: {} does not fit a run of {} with {}..={} on line through {:?}",
                n,
                line.len(),
                min,
                max,
                cell
            );
            false
        }
        _ => true,
    }
}

impl LineCheck for Whispers {
    fn check(&self, ctx: &EvaluationContext<'_>, n: u8, cell: CellId, _mode: EvaluationMode) -> bool {
        let size = ctx.size() as i32;
        let diff = (size + 1) / 2;
        let n = n as i32;

        for (line, index) in lines_through(self.lines(), cell) {
            // No digit is far enough from the middle digit(s).
            if n - diff <= 0 && n + diff > size {
                return false;
            }

            let prev = index.checked_sub(1).map(|i| line[i]);
            let next = line.get(index + 1).copied();
            for neighbor in prev.into_iter().chain(next) {
                let value = ctx.grid.value(neighbor) as i32;
                if value != 0 && (value - n).abs() < diff {
                    trace!(
                        target: "evaluator",
                        "Whispers: {} in {:?} too close to {} in {:?}",
                        n,
                        cell,
                        value,
                        neighbor
                    );
                    return false;
                }
            }
        }
        true
    }
}

/// Digits an interior cell can never take once both endpoints are known,
/// keyed by the required endpoint gap. Kept exactly as the rule set is
/// published for the constraint.
fn lockout_excludes_middle(lockout_diff: i32, n: i32) -> bool {
    match lockout_diff {
        4 => n == 5,
        3 => n == 3 || n == 4,
        2 => n == 2 || n == 3,
        _ => false,
    }
}

impl LineCheck for Lockout {
    fn check(&self, ctx: &EvaluationContext<'_>, n: u8, cell: CellId, _mode: EvaluationMode) -> bool {
        let lockout_diff = (ctx.size() / 2) as i32;
        let n = n as i32;

        for (line, index) in lines_through(self.lines(), cell) {
            let last = line.len() - 1;
            let end0 = ctx.grid.value(line[0]) as i32;
            let end1 = ctx.grid.value(line[last]) as i32;
            let is_endpoint = index == 0 || index == last;

            if end0 != 0 && end1 != 0 {
                if !is_endpoint {
                    let (low, high) = (end0.min(end1), end0.max(end1));
                    if (low..=high).contains(&n) || lockout_excludes_middle(lockout_diff, n) {
                        trace!(
                            target: "evaluator",
                            "Lockout: {} locked out of {:?} by ends {} and {}",
                            n,
                            cell,
                            end0,
                            end1
                        );
                        return false;
                    }
                } else if (end0 - end1).abs() < lockout_diff {
                    trace!(
                        target: "evaluator",
                        "Lockout: ends {} and {} closer than {}",
                        end0,
                        end1,
                        lockout_diff
                    );
                    return false;
                }
            } else if is_endpoint && last > 0 {
                let other = if index == 0 { end1 } else { end0 };
                if other == n {
                    return false;
                }
            }
        }
        true
    }
}

impl LineCheck for LineConstraint {
    fn check(&self, ctx: &EvaluationContext<'_>, n: u8, cell: CellId, mode: EvaluationMode) -> bool {
        match self {
            LineConstraint::Renban(renban) => renban.check(ctx, n, cell, mode),
            LineConstraint::Whispers(whispers) => whispers.check(ctx, n, cell, mode),
            LineConstraint::Lockout(lockout) => lockout.check(ctx, n, cell, mode),
        }
    }
}
