use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Malformed cell reference: {0}")]
    MalformedCellReference(String),

    #[error("Cell {cell} is outside of a {size}x{size} grid")]
    CellOutOfRange { cell: String, size: usize },

    #[error("Malformed grid entry: {0}")]
    MalformedGrid(String),

    #[error("Unsupported grid size {0}")]
    UnsupportedSize(usize),

    #[error("Grid row has {rows} entries but puzzle size is {size}")]
    GridShapeMismatch { rows: usize, size: usize },

    #[error("Value {value} in {cell} is outside of 0..={size}")]
    ValueOutOfRange { cell: String, value: u8, size: usize },

    #[error("{kind} line visits {cell} more than once")]
    RepeatedLineCell { kind: String, cell: String },

    #[error("{kind} line has {len} cells but the grid is only {size} wide")]
    LineTooLong { kind: String, len: usize, size: usize },

    #[error("Failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
