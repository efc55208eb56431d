use serde::{Deserialize, Serialize};

/// How a filled cell is treated when asking which digits it can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum EvaluationMode {
    /// Editor view: a filled cell's only candidate is its own value.
    #[default]
    Interactive,
    /// Solver view: a filled cell is tested like an empty one.
    BruteForce,
}

impl EvaluationMode {
    pub fn is_brute_force(&self) -> bool {
        matches!(self, EvaluationMode::BruteForce)
    }
}
