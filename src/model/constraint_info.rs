use crate::model::ConstraintKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Line,
    /// A line drawn with diamond markers on both ends.
    LineWithEnds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondGeometry {
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

/// Static drawing and help metadata for a constraint kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintInfo {
    pub kind: ConstraintKind,
    pub line_kind: LineKind,
    pub color: &'static str,
    pub color_dark: &'static str,
    pub line_width: f64,
    pub diamond: Option<DiamondGeometry>,
    pub tooltip: &'static [&'static str],
}

static RENBAN: ConstraintInfo = ConstraintInfo {
    kind: ConstraintKind::Renban,
    line_kind: LineKind::Line,
    color: "#C060C0",
    color_dark: "#603060",
    line_width: 0.4,
    diamond: None,
    tooltip: &[
        "Numbers on a renban line must be consecutive, but in any order.",
        "Digits cannot repeat on a renban line.",
        "",
        "Click and drag to draw a renban line.",
        "Click on a renban line to remove it.",
        "Shift click and drag to draw overlapping renban lines.",
    ],
};

static WHISPERS: ConstraintInfo = ConstraintInfo {
    kind: ConstraintKind::Whispers,
    line_kind: LineKind::Line,
    color: "#60C060",
    color_dark: "#306030",
    line_width: 0.3,
    diamond: None,
    tooltip: &[
        "Adjacent numbers on a whispers line must have a difference of 5 or greater.",
        "[For non-9x9 grid sizes, this adjust to be (size / 2) rounded up.]",
        "",
        "Click and drag to draw a whispers line.",
        "Click on a whispers line to remove it.",
        "Shift click and drag to draw overlapping whispers lines.",
    ],
};

static LOCKOUT: ConstraintInfo = ConstraintInfo {
    kind: ConstraintKind::Lockout,
    line_kind: LineKind::LineWithEnds,
    color: "#006CBA",
    color_dark: "#0094FF",
    line_width: 0.2,
    diamond: Some(DiamondGeometry {
        width: 0.55,
        height: 0.55,
        angle: 45.0,
    }),
    tooltip: &[
        "Numbers along a lockout line must not be between or equal to the numbers in the diamond ends.",
        "These endpoints must differ by 4 or greater.",
        "[For sizes other than 9, these differ by (size / 2) rounded down.]",
        "When endpoints are shared, each lockout segment is treated as an independent lockout line.",
        "",
        "Click and drag to draw a lockout line.",
        "Click on a lockout line to remove it.",
    ],
};

impl ConstraintKind {
    pub fn info(&self) -> &'static ConstraintInfo {
        match self {
            ConstraintKind::Renban => &RENBAN,
            ConstraintKind::Whispers => &WHISPERS,
            ConstraintKind::Lockout => &LOCKOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lockout_has_diamond_ends() {
        for kind in ConstraintKind::all() {
            let info = kind.info();
            assert_eq!(info.kind, kind);
            assert_eq!(info.diamond.is_some(), info.line_kind == LineKind::LineWithEnds);
        }
        assert_eq!(ConstraintKind::Lockout.info().line_kind, LineKind::LineWithEnds);
    }
}
