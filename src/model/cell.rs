use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellId {
    pub row: usize, // zero-based
    pub col: usize, // zero-based
}

impl CellId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a cell reference of the form "R1C1" (one-based, case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || PuzzleError::MalformedCellReference(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix('R').ok_or_else(malformed)?;
        let (row, col) = rest.split_once('C').ok_or_else(malformed)?;
        let row = row.parse::<usize>().map_err(|_| malformed())?;
        let col = col.parse::<usize>().map_err(|_| malformed())?;
        if row == 0 || col == 0 {
            return Err(malformed());
        }
        Ok(Self::new(row - 1, col - 1))
    }
}

impl TryFrom<String> for CellId {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self> {
        CellId::parse(&value)
    }
}

impl From<CellId> for String {
    fn from(cell: CellId) -> String {
        cell.to_string()
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.col + 1)
    }
}

impl std::fmt::Debug for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.col + 1)
    }
}
