use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// A tetromino placed on the grid: kind, rotation state, and position.
///
/// Pieces are plain values. Movement and rotation return new `Piece` instances,
/// leaving the decision of whether the result is legal to the caller (see
/// [`Grid::is_colliding`](super::grid::Grid::is_colliding)).
///
/// # Coordinate System
///
/// - The position is the top-left corner of the current rotation matrix
/// - X increases rightward (columns), Y increases downward (rows)
/// - Y may be negative: a piece may hang above the visible field
///
/// # Example
///
/// ```
/// use quadris_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!(piece.position().x(), 4);
///
/// let moved = piece.shifted(1, 2).rotated();
/// assert_eq!(moved.position().y(), 2);
/// assert_eq!(moved.rotation().index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece in its first rotation state at the given position.
    #[must_use]
    pub const fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            position,
            rotation: PieceRotation(0),
            kind,
        }
    }

    /// Creates a piece at the spawn position of a grid `columns` wide.
    ///
    /// The piece is centred horizontally (`columns / 2 - width / 2`, floor
    /// division, using the width of the first rotation state) on row 0. On a
    /// grid narrower than the piece it spawns at column 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, columns: usize) -> Self {
        let width = kind.rotation_states()[0].width();
        let x = coordinate((columns / 2).saturating_sub(width / 2));
        Self::new(kind, PiecePosition::new(x, 0))
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the matrix of the current rotation state.
    #[must_use]
    pub fn matrix(&self) -> &'static ShapeMatrix {
        &self.kind.rotation_states()[self.rotation.index()]
    }

    /// Returns the grid coordinates of the four cells this piece occupies.
    #[must_use]
    pub fn occupied_positions(&self) -> ArrayVec<(i32, i32), 4> {
        self.matrix()
            .occupied_cells()
            .map(|(dx, dy)| {
                (
                    self.position.x + i32::from(dx),
                    self.position.y + i32::from(dy),
                )
            })
            .collect()
    }

    /// Returns this piece translated by `(dx, dy)`.
    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.shifted(dx, dy),
            ..*self
        }
    }

    /// Returns this piece advanced to its next rotation state.
    ///
    /// Wraps around after the last state; for the O piece this is the same piece.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.next(self.kind.rotation_count()),
            ..*self
        }
    }
}

/// Converts a validated grid dimension into a signed grid coordinate.
pub(crate) fn coordinate(value: usize) -> i32 {
    i32::try_from(value).expect("grid dimensions are validated to fit in i32")
}

/// Position of a piece's matrix origin on the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Index into a piece kind's rotation state table.
///
/// Rotation wraps modulo the number of states the kind has (1, 2 or 4).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[expect(clippy::cast_possible_truncation)]
    const fn next(self, count: usize) -> Self {
        PieceRotation(((self.0 as usize + 1) % count) as u8)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the rotation states of this kind, in clockwise order.
    #[must_use]
    pub const fn rotation_states(self) -> &'static [ShapeMatrix] {
        match self {
            PieceKind::I => I_STATES,
            PieceKind::O => O_STATES,
            PieceKind::S => S_STATES,
            PieceKind::Z => Z_STATES,
            PieceKind::J => J_STATES,
            PieceKind::L => L_STATES,
            PieceKind::T => T_STATES,
        }
    }

    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotation_states().len()
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }
}

/// One rotation state of a piece: a boolean matrix of up to 4×4 cells.
///
/// Only the top-left `width × height` region is meaningful. Every state of
/// every kind marks exactly four cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; 4]; 4],
}

impl ShapeMatrix {
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W <= 4 && H <= 4);
        let mut cells = [[false; 4]; 4];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at `(x, y)` of the matrix is occupied.
    ///
    /// Coordinates outside the matrix are reported as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Returns the `(x, y)` offsets of the occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[usize::from(y)][usize::from(x)])
                .map(move |x| (x, y))
        })
    }
}

const I_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[1, 1, 1, 1]]),
    ShapeMatrix::from_rows([[1], [1], [1], [1]]),
];

const O_STATES: &[ShapeMatrix] = &[ShapeMatrix::from_rows([[1, 1], [1, 1]])];

const S_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
    ShapeMatrix::from_rows([[1, 0], [1, 1], [0, 1]]),
];

const Z_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
    ShapeMatrix::from_rows([[0, 1], [1, 1], [1, 0]]),
];

const J_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1]]),
    ShapeMatrix::from_rows([[1, 1], [1, 0], [1, 0]]),
    ShapeMatrix::from_rows([[1, 1, 1], [0, 0, 1]]),
    ShapeMatrix::from_rows([[0, 1], [0, 1], [1, 1]]),
];

const L_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
    ShapeMatrix::from_rows([[1, 0], [1, 0], [1, 1]]),
    ShapeMatrix::from_rows([[1, 1, 1], [1, 0, 0]]),
    ShapeMatrix::from_rows([[1, 1], [0, 1], [0, 1]]),
];

const T_STATES: &[ShapeMatrix] = &[
    ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
    ShapeMatrix::from_rows([[1, 0], [1, 1], [1, 0]]),
    ShapeMatrix::from_rows([[1, 1, 1], [0, 1, 0]]),
    ShapeMatrix::from_rows([[0, 1], [1, 1], [0, 1]]),
];
