pub mod base_evaluator;
pub mod brute_force;
pub mod candidate_evaluator;
pub mod line_checks;
pub mod puzzle_document;
pub mod settings;

pub use base_evaluator::{BaseEvaluator, ClassicSudoku, NoBaseRules};
pub use brute_force::{BruteForceSolver, SearchOutcome};
pub use candidate_evaluator::{is_candidate_possible, EvaluationContext};
pub use line_checks::LineCheck;
pub use puzzle_document::{export_puzzle, import_puzzle, PuzzleDocument};
pub use settings::Settings;
