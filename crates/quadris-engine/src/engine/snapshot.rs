use crate::{Grid, Piece, PieceKind, PiecePosition, ShapeMatrix};

use super::{GameStats, SessionState};

/// A piece as seen by a renderer: its kind, current matrix, and grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub position: PiecePosition,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            matrix: *piece.matrix(),
            position: piece.position(),
        }
    }
}

/// Owned copy of everything needed to draw one frame.
///
/// Taken with [`Engine::snapshot`](super::Engine::snapshot). The snapshot does
/// not borrow the engine, so it can be handed to another thread or kept across
/// engine updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub active: PieceView,
    /// The active piece at its hard-drop resting position.
    pub ghost: PieceView,
    /// The next piece, at its spawn position.
    pub next: PieceView,
    pub state: SessionState,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub stats: GameStats,
}

impl Snapshot {
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}
