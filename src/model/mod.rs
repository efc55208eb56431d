mod cell;
mod constraint_info;
mod constraint_registry;
mod evaluation_mode;
mod grid;
mod line_constraint;

pub use cell::CellId;
pub use constraint_info::{ConstraintInfo, DiamondGeometry, LineKind};
pub use constraint_registry::{ConstraintRegistry, SharedRegistry};
pub use evaluation_mode::EvaluationMode;
pub use grid::{Grid, MAX_GRID_SIZE};
pub use line_constraint::{ConstraintKind, Line, LineConstraint, Lockout, Renban, Whispers};
