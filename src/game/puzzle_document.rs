//! JSON puzzle documents.
//!
//! Line constraints are written under their own keys (`renban`, `whispers`,
//! `lockout`). Readers without support for them would drop them silently, so
//! export also adds plain cosmetic `line` (and, for lockout, diamond
//! `rectangle`) entries that draw the same thing. Those entries are tagged
//! `isNewConstraint` and stripped again on import so they never pile up.

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PuzzleError, Result};
use crate::model::{CellId, ConstraintKind, ConstraintRegistry, Grid, LineConstraint, LineKind, Lockout, Renban, Whispers};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u8) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridEntry {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub value: u8,
    #[serde(default, skip_serializing_if = "is_false")]
    pub given: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticLine {
    #[serde(default)]
    pub lines: Vec<Vec<String>>,
    #[serde(rename = "outlineC", default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new_constraint: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticRectangle {
    #[serde(default)]
    pub cells: Vec<String>,
    #[serde(rename = "baseC", default, skip_serializing_if = "Option::is_none")]
    pub base_color: Option<String>,
    #[serde(rename = "outlineC", default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(rename = "fontC", default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new_constraint: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDocument {
    pub size: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grid: Vec<Vec<GridEntry>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renban: Vec<Renban>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whispers: Vec<Whispers>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lockout: Vec<Lockout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Vec<CosmeticLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<Vec<CosmeticRectangle>>,
    /// Everything else the host writes, carried through untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PuzzleDocument {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn instances(&self) -> Vec<LineConstraint> {
        let renban = self.renban.iter().cloned().map(LineConstraint::Renban);
        let whispers = self.whispers.iter().cloned().map(LineConstraint::Whispers);
        let lockout = self.lockout.iter().cloned().map(|mut lockout| {
            lockout.fill_missing_cells();
            LineConstraint::Lockout(lockout)
        });
        renban.chain(whispers).chain(lockout).collect()
    }

    /// Appends cosmetic stand-ins for every line constraint instance.
    pub fn add_fallback_visuals(&mut self) {
        for constraint in self.instances() {
            let info = constraint.kind().info();
            let lines: Vec<Vec<String>> = constraint
                .lines()
                .iter()
                .map(|line| line.iter().map(|cell| cell.to_string()).collect())
                .collect();

            self.line.get_or_insert_with(Vec::new).push(CosmeticLine {
                lines,
                outline_color: Some(info.color.to_string()),
                width: Some(info.line_width),
                is_new_constraint: true,
                extra: Map::new(),
            });

            if let (LineKind::LineWithEnds, Some(diamond), LineConstraint::Lockout(lockout)) =
                (info.line_kind, info.diamond, &constraint)
            {
                let cells = lockout.cells();
                let ends = [cells.first(), cells.last()];
                for end in ends.into_iter().flatten() {
                    self.rectangle.get_or_insert_with(Vec::new).push(CosmeticRectangle {
                        cells: vec![end.to_string()],
                        base_color: Some("#FFFFFF".to_string()),
                        outline_color: Some(info.color.to_string()),
                        font_color: Some("#000000".to_string()),
                        width: Some(diamond.width),
                        height: Some(diamond.height),
                        angle: Some(diamond.angle),
                        is_new_constraint: true,
                        extra: Map::new(),
                    });
                }
            }
        }
    }

    /// Removes the entries [`add_fallback_visuals`](Self::add_fallback_visuals) made.
    pub fn strip_fallback_visuals(&mut self) {
        if let Some(lines) = self.line.as_mut() {
            lines.retain(|line| !line.is_new_constraint);
            if lines.is_empty() {
                self.line = None;
            }
        }
        if let Some(rectangles) = self.rectangle.as_mut() {
            rectangles.retain(|rectangle| !rectangle.is_new_constraint);
            if rectangles.is_empty() {
                self.rectangle = None;
            }
        }
    }
}

/// Builds a document for `grid` and `registry`, cosmetic fallbacks included.
pub fn export_puzzle(grid: &Grid, registry: &ConstraintRegistry) -> PuzzleDocument {
    let size = grid.size();
    let rows = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let value = grid.value(CellId::new(row, col));
                    GridEntry {
                        value,
                        given: value != 0,
                        extra: Map::new(),
                    }
                })
                .collect()
        })
        .collect();

    let mut document = PuzzleDocument {
        size,
        grid: rows,
        ..PuzzleDocument::default()
    };
    for constraint in registry.iter() {
        match constraint {
            LineConstraint::Renban(renban) => document.renban.push(renban.clone()),
            LineConstraint::Whispers(whispers) => document.whispers.push(whispers.clone()),
            LineConstraint::Lockout(lockout) => document.lockout.push(lockout.clone()),
        }
    }
    document.add_fallback_visuals();
    debug!(target: "document", "Exported {} line constraint(s)", registry.len());
    document
}

/// Reads the grid and line constraints back out of `document`. Cosmetic
/// fallbacks are stripped from the document first.
pub fn import_puzzle(document: &mut PuzzleDocument) -> Result<(Grid, ConstraintRegistry)> {
    document.strip_fallback_visuals();

    let mut grid = Grid::new(document.size)?;
    if document.grid.len() > document.size {
        return Err(PuzzleError::GridShapeMismatch {
            rows: document.grid.len(),
            size: document.size,
        });
    }
    for (row, entries) in document.grid.iter().enumerate() {
        if entries.len() > document.size {
            return Err(PuzzleError::GridShapeMismatch {
                rows: entries.len(),
                size: document.size,
            });
        }
        for (col, entry) in entries.iter().enumerate() {
            grid.set_value(CellId::new(row, col), entry.value)?;
        }
    }

    let mut registry = ConstraintRegistry::new();
    for constraint in document.instances() {
        let kind = constraint.kind();
        if constraint.lines().is_empty() || constraint.lines().iter().any(|line| line.is_empty()) {
            warn!(target: "document", "Skipping {} entry with an empty line", kind);
            continue;
        }
        if let Some(cell) = constraint.lines().iter().flatten().find(|cell| !grid.contains(**cell)) {
            return Err(PuzzleError::CellOutOfRange {
                cell: cell.to_string(),
                size: document.size,
            });
        }
        if let Some(cell) = constraint.lines().iter().find_map(|line| line.iter().duplicates().next()) {
            return Err(PuzzleError::RepeatedLineCell {
                kind: kind.to_string(),
                cell: cell.to_string(),
            });
        }
        if kind == ConstraintKind::Renban {
            if let Some(line) = constraint.lines().iter().find(|line| line.len() > document.size) {
                return Err(PuzzleError::LineTooLong {
                    kind: kind.to_string(),
                    len: line.len(),
                    size: document.size,
                });
            }
        }
        registry.add(constraint);
    }

    debug!(target: "document", "Imported {} line constraint(s)", registry.len());
    Ok((grid, registry))
}
