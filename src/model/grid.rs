use crate::error::{PuzzleError, Result};
use crate::model::CellId;

pub const MAX_GRID_SIZE: usize = 16;

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    region_height: usize,
    region_width: usize,
    values: Vec<u8>, // [row * size + col], 0 = empty
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = if self.size > 9 { 3 } else { 2 };
        let mut output = String::new();
        output.push('\n');
        for row in 0..self.size {
            for col in 0..self.size {
                match self.value(CellId::new(row, col)) {
                    0 => output.push_str(&format!("{:>width$}", ".", width = width)),
                    v => output.push_str(&format!("{:>width$}", v, width = width)),
                }
                if (col + 1) % self.region_width == 0 && col + 1 < self.size {
                    output.push_str(" |");
                }
            }
            output.push('\n');
            if (row + 1) % self.region_height == 0 && row + 1 < self.size {
                output.push_str(&"-".repeat(self.size * width + 2 * (self.size / self.region_width)));
                output.push('\n');
            }
        }
        write!(f, "{}", output)
    }
}

impl Grid {
    /// Creates an empty grid, picking the most square region shape that tiles it.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(PuzzleError::UnsupportedSize(size));
        }
        let region_height = (1..=size)
            .take_while(|h| h * h <= size)
            .filter(|h| size % h == 0)
            .last()
            .unwrap_or(1);

        Ok(Self {
            size,
            region_height,
            region_width: size / region_height,
            values: vec![0; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn region_height(&self) -> usize {
        self.region_height
    }

    pub fn region_width(&self) -> usize {
        self.region_width
    }

    pub fn contains(&self, cell: CellId) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Value assigned to `cell`, 0 when unset or outside the grid.
    pub fn value(&self, cell: CellId) -> u8 {
        if !self.contains(cell) {
            return 0;
        }
        self.values[cell.row * self.size + cell.col]
    }

    pub fn is_filled(&self, cell: CellId) -> bool {
        self.value(cell) != 0
    }

    pub fn set_value(&mut self, cell: CellId, value: u8) -> Result<()> {
        if !self.contains(cell) {
            return Err(PuzzleError::CellOutOfRange {
                cell: cell.to_string(),
                size: self.size,
            });
        }
        if value as usize > self.size {
            return Err(PuzzleError::ValueOutOfRange {
                cell: cell.to_string(),
                value,
                size: self.size,
            });
        }
        self.values[cell.row * self.size + cell.col] = value;
        Ok(())
    }

    /// Places a digit already known to be in range for this grid.
    pub(crate) fn put(&mut self, cell: CellId, value: u8) {
        debug_assert!(self.contains(cell) && value as usize <= self.size);
        self.values[cell.row * self.size + cell.col] = value;
    }

    pub fn clear_value(&mut self, cell: CellId) {
        if self.contains(cell) {
            self.values[cell.row * self.size + cell.col] = 0;
        }
    }

    /// Index of the region (box) containing `cell`, numbered left to right, top to bottom.
    pub fn region_of(&self, cell: CellId) -> usize {
        let regions_per_row = self.size / self.region_width;
        (cell.row / self.region_height) * regions_per_row + cell.col / self.region_width
    }

    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| CellId::new(row, col)))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells().filter(move |cell| !self.is_filled(*cell))
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// Parse a grid from text, one row per line. Rows are either runs of
    /// single characters (`1`-`9`, `.` or `0` for empty) or whitespace
    /// separated numbers for grids larger than 9. Lines starting with `-`
    /// and `|` separators are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let rows: Vec<Vec<u8>> = input
            .lines()
            .map(|line| line.replace('|', " "))
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty() && !line.starts_with('-'))
            .map(|line| parse_row(&line))
            .collect::<Result<_>>()?;

        let size = rows.len();
        let mut grid = Self::new(size)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(PuzzleError::GridShapeMismatch {
                    rows: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                grid.set_value(CellId::new(row, col), value)?;
            }
        }
        Ok(grid)
    }
}

fn parse_row(line: &str) -> Result<Vec<u8>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let numbered = tokens.len() > 1 && tokens.iter().all(|t| *t == "." || t.parse::<u8>().is_ok());
    let parse_token = |token: &str| -> Result<u8> {
        match token {
            "." | "0" => Ok(0),
            _ => token
                .parse::<u8>()
                .map_err(|_| PuzzleError::MalformedGrid(token.to_string())),
        }
    };

    if numbered {
        tokens.into_iter().map(parse_token).collect()
    } else {
        line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| parse_token(&c.to_string()))
            .collect()
    }
}
