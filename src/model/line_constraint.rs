use serde::{Deserialize, Serialize};

use crate::model::CellId;

/// An ordered path of cells. Never empty once owned by a constraint.
pub type Line = Vec<CellId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ConstraintKind {
    Renban,
    Whispers,
    Lockout,
}

impl ConstraintKind {
    pub fn all() -> Vec<ConstraintKind> {
        vec![
            ConstraintKind::Renban,
            ConstraintKind::Whispers,
            ConstraintKind::Lockout,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Renban => "Renban",
            ConstraintKind::Whispers => "Whispers",
            ConstraintKind::Lockout => "Lockout",
        }
    }

    /// Key used for this kind in puzzle documents.
    pub fn id(&self) -> &'static str {
        match self {
            ConstraintKind::Renban => "renban",
            ConstraintKind::Whispers => "whispers",
            ConstraintKind::Lockout => "lockout",
        }
    }

    pub fn from_id(id: &str) -> Option<ConstraintKind> {
        Self::all().into_iter().find(|kind| kind.id() == id)
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Consecutive digits in any order, no repeats. Lines are capped at the grid size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Renban {
    lines: Vec<Line>,
}

impl Renban {
    pub fn new(cell: CellId) -> Self {
        Self {
            lines: vec![vec![cell]],
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn add_cell_to_line(&mut self, cell: CellId, size: usize) -> bool {
        match self.lines.last_mut() {
            Some(line) if line.len() < size && !line.contains(&cell) => {
                line.push(cell);
                true
            }
            _ => false,
        }
    }

    pub fn start_line(&mut self, cell: CellId) {
        self.lines.push(vec![cell]);
    }
}

/// Adjacent cells differ by at least half the grid size, rounded up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Whispers {
    lines: Vec<Line>,
}

impl Whispers {
    pub fn new(cell: CellId) -> Self {
        Self {
            lines: vec![vec![cell]],
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn add_cell_to_line(&mut self, cell: CellId) -> bool {
        match self.lines.last_mut() {
            Some(line) if !line.contains(&cell) => {
                line.push(cell);
                true
            }
            _ => false,
        }
    }

    pub fn start_line(&mut self, cell: CellId) {
        self.lines.push(vec![cell]);
    }
}

/// Diamond endpoints at `line[0]` and `line[len - 1]` must differ by at least
/// half the grid size, rounded down. Digits between them may not fall inside
/// the endpoints' closed range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lockout {
    lines: Vec<Line>,
    #[serde(default)]
    cells: Vec<CellId>,
}

impl Lockout {
    pub fn new(cell: CellId) -> Self {
        Self {
            lines: vec![vec![cell]],
            cells: vec![cell],
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Every cell added, in the order it was added.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn add_cell_to_line(&mut self, cell: CellId) -> bool {
        match self.lines.last_mut() {
            Some(line) if !line.contains(&cell) => {
                line.push(cell);
                self.cells.push(cell);
                true
            }
            _ => false,
        }
    }

    pub fn start_line(&mut self, cell: CellId) {
        self.lines.push(vec![cell]);
        self.cells.push(cell);
    }

    /// Documents written without a flat cell list get one rebuilt from the lines.
    pub(crate) fn fill_missing_cells(&mut self) {
        if self.cells.is_empty() {
            self.cells = self.lines.iter().flatten().copied().collect();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineConstraint {
    Renban(Renban),
    Whispers(Whispers),
    Lockout(Lockout),
}

impl LineConstraint {
    /// Creates a one-cell instance, as happens on the first click of a line tool.
    pub fn new(kind: ConstraintKind, cell: CellId) -> Self {
        match kind {
            ConstraintKind::Renban => LineConstraint::Renban(Renban::new(cell)),
            ConstraintKind::Whispers => LineConstraint::Whispers(Whispers::new(cell)),
            ConstraintKind::Lockout => LineConstraint::Lockout(Lockout::new(cell)),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            LineConstraint::Renban(_) => ConstraintKind::Renban,
            LineConstraint::Whispers(_) => ConstraintKind::Whispers,
            LineConstraint::Lockout(_) => ConstraintKind::Lockout,
        }
    }

    pub fn lines(&self) -> &[Line] {
        match self {
            LineConstraint::Renban(renban) => renban.lines(),
            LineConstraint::Whispers(whispers) => whispers.lines(),
            LineConstraint::Lockout(lockout) => lockout.lines(),
        }
    }

    /// Appends `cell` to the line currently being drawn. Returns false when
    /// the cell was refused (already on the line, or a full renban line).
    pub fn add_cell_to_line(&mut self, cell: CellId, size: usize) -> bool {
        match self {
            LineConstraint::Renban(renban) => renban.add_cell_to_line(cell, size),
            LineConstraint::Whispers(whispers) => whispers.add_cell_to_line(cell),
            LineConstraint::Lockout(lockout) => lockout.add_cell_to_line(cell),
        }
    }

    pub fn start_line(&mut self, cell: CellId) {
        match self {
            LineConstraint::Renban(renban) => renban.start_line(cell),
            LineConstraint::Whispers(whispers) => whispers.start_line(cell),
            LineConstraint::Lockout(lockout) => lockout.start_line(cell),
        }
    }

    pub fn contains_cell(&self, cell: CellId) -> bool {
        self.lines().iter().any(|line| line.contains(&cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> CellId {
        CellId::parse(s).unwrap()
    }

    #[test]
    fn test_renban_caps_line_length_at_size() {
        let mut renban = LineConstraint::new(ConstraintKind::Renban, c("R1C1"));
        assert!(renban.add_cell_to_line(c("R1C2"), 4));
        assert!(renban.add_cell_to_line(c("R1C3"), 4));
        assert!(renban.add_cell_to_line(c("R1C4"), 4));
        assert!(!renban.add_cell_to_line(c("R2C4"), 4));
        assert_eq!(renban.lines()[0].len(), 4);
    }

    #[test]
    fn test_whispers_is_unbounded() {
        let mut whispers = LineConstraint::new(ConstraintKind::Whispers, c("R1C1"));
        for col in 2..=4 {
            assert!(whispers.add_cell_to_line(CellId::new(0, col - 1), 4));
        }
        for row in 2..=4 {
            assert!(whispers.add_cell_to_line(CellId::new(row - 1, 3), 4));
        }
        assert_eq!(whispers.lines()[0].len(), 7);
    }

    #[test]
    fn test_cells_do_not_repeat_within_a_line() {
        let mut whispers = LineConstraint::new(ConstraintKind::Whispers, c("R1C1"));
        assert!(whispers.add_cell_to_line(c("R1C2"), 9));
        assert!(!whispers.add_cell_to_line(c("R1C1"), 9));
        assert_eq!(whispers.lines()[0], vec![c("R1C1"), c("R1C2")]);
    }

    #[test]
    fn test_lockout_tracks_flat_cells_in_order() {
        let mut lockout = Lockout::new(c("R1C1"));
        lockout.add_cell_to_line(c("R1C2"));
        lockout.add_cell_to_line(c("R1C3"));
        lockout.start_line(c("R3C3"));
        lockout.add_cell_to_line(c("R4C3"));

        assert_eq!(lockout.lines().len(), 2);
        assert_eq!(
            lockout.cells(),
            &[c("R1C1"), c("R1C2"), c("R1C3"), c("R3C3"), c("R4C3")]
        );
    }

    #[test]
    fn test_shared_cells_across_lines() {
        let mut renban = LineConstraint::new(ConstraintKind::Renban, c("R1C1"));
        renban.add_cell_to_line(c("R1C2"), 9);
        renban.start_line(c("R1C2"));
        renban.add_cell_to_line(c("R2C2"), 9);
        assert!(renban.contains_cell(c("R1C2")));
        assert!(!renban.contains_cell(c("R9C9")));
        assert_eq!(renban.lines().len(), 2);
    }

    #[test]
    fn test_kind_ids() {
        for kind in ConstraintKind::all() {
            assert_eq!(ConstraintKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ConstraintKind::from_id("thermometer"), None);
    }
}
