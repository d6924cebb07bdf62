use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind};

/// A single cell of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a locked block of the given piece kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Piece(kind) => Some(kind),
        }
    }
}

/// The playing field: a fixed `width × height` array of cells.
///
/// Row 0 is the top of the visible field. A cell becomes non-empty only when a
/// piece is locked over it, and full rows are removed by [`Grid::clear_lines`].
///
/// # Example
///
/// ```
/// use quadris_engine::{Cell, Grid, Piece, PieceKind};
///
/// let mut grid = Grid::new(10, 20);
/// let piece = Piece::spawn(PieceKind::O, 10).shifted(0, 18);
/// assert!(!grid.is_colliding(&piece, 0, 0));
/// assert!(grid.is_colliding(&piece, 0, 1));
///
/// grid.fill_piece(&piece);
/// assert_eq!(grid.cell(4, 19), Some(Cell::Piece(PieceKind::O)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Sets the cell at `(x, y)`.
    ///
    /// Returns `false` without changing anything if the coordinate is out of bounds.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns whether every cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Tests whether `piece`, translated by `(dx, dy)`, collides with the grid.
    ///
    /// A cell collides when it lies left of column 0, right of the last column,
    /// at or below the bottom edge, or over an occupied cell. Cells above the
    /// top edge (negative rows) are checked against the side walls only, so a
    /// piece may hang partially above the field.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.occupied_positions().into_iter().any(|(x, y)| {
            let Some(x) = usize::try_from(x + dx).ok().filter(|&x| x < self.width) else {
                return true;
            };
            match usize::try_from(y + dy) {
                Err(_) => false,
                Ok(y) => self.rows.get(y).is_none_or(|row| !row[x].is_empty()),
            }
        })
    }

    /// Writes the piece's kind into every in-bounds cell it occupies.
    ///
    /// Out-of-bounds cells are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                self.set_cell(x, y, Cell::Piece(piece.kind()));
            }
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Surviving rows keep their order and shift down; as many empty rows as
    /// were removed are inserted at the top, so the height never changes.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.rows.len()).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.fill(Cell::Empty);
        }
        count
    }
}
