use crate::color::{Rgba, DEFAULT_BG, DEFAULT_FG};

/// Text attributes set by SGR sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Rgba,
    pub bg: Rgba,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            bold: false,
            italic: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub bold: bool,
    pub italic: bool,
}

impl Cell {
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            fg: style.fg,
            bg: style.bg,
            bold: style.bold,
            italic: style.italic,
        }
    }

    /// Blank cells get no glyph; the background fill covers them.
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }

    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            bold: self.bold,
            italic: self.italic,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// Fixed-size `rows × cols` cell matrix, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a blank grid. A size whose cell count overflows `usize`
    /// yields an empty `0 × 0` grid instead.
    pub fn new(cols: usize, rows: usize) -> Self {
        let Some(len) = cols.checked_mul(rows) else {
            return Self {
                cols: 0,
                rows: 0,
                cells: Vec::new(),
            };
        };
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Writes `cell` at `(row, col)`. Returns `false` and leaves the grid
    /// untouched when the position is outside the grid.
    pub fn put(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col] = cell;
        true
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// All cells in scan order as `(row, col, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    /// Plain-text view: one line per row with trailing blanks trimmed.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows);
        for row in 0..self.rows {
            if row > 0 {
                out.push('\n');
            }
            let start = row * self.cols;
            let line: String = self.cells[start..start + self.cols]
                .iter()
                .map(|c| c.ch)
                .collect();
            out.push_str(line.trim_end_matches(' '));
        }
        out
    }
}
