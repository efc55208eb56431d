use crate::model::{CellId, EvaluationMode, Grid};

/// The host's candidate check that runs before any line constraint. A `false`
/// from here is final.
pub trait BaseEvaluator: std::fmt::Debug {
    fn is_candidate_possible(&self, grid: &Grid, n: u8, cell: CellId, mode: EvaluationMode) -> bool;
}

/// Row, column and region uniqueness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicSudoku;

impl BaseEvaluator for ClassicSudoku {
    fn is_candidate_possible(&self, grid: &Grid, n: u8, cell: CellId, _mode: EvaluationMode) -> bool {
        let size = grid.size();
        let region_row = (cell.row / grid.region_height()) * grid.region_height();
        let region_col = (cell.col / grid.region_width()) * grid.region_width();

        for i in 0..size {
            let in_row = CellId::new(cell.row, i);
            if in_row != cell && grid.value(in_row) == n {
                return false;
            }
            let in_col = CellId::new(i, cell.col);
            if in_col != cell && grid.value(in_col) == n {
                return false;
            }
            let in_region = CellId::new(
                region_row + i / grid.region_width(),
                region_col + i % grid.region_width(),
            );
            if in_region != cell && grid.value(in_region) == n {
                return false;
            }
        }
        true
    }
}

/// For hosts that apply their own rules before asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBaseRules;

impl BaseEvaluator for NoBaseRules {
    fn is_candidate_possible(&self, _grid: &Grid, _n: u8, _cell: CellId, _mode: EvaluationMode) -> bool {
        true
    }
}
