use std::time::Duration;

use tracing::{debug, info};

use crate::{
    ConfigError, PieceCollisionError,
    core::{grid::Grid, piece::Piece},
};

use super::{
    Command, EngineConfig, GameStats, PieceSeed, PieceSource, PieceView, RandomPieceSource,
    Snapshot,
};

/// Column offsets tried, in order, when a rotated piece collides in place.
const KICK_OFFSETS: [i32; 4] = [-1, 1, -2, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A single game: the grid, the active and next pieces, gravity, and scoring.
///
/// The engine is driven from outside. A driver calls [`Engine::tick`] with the
/// time elapsed since the previous call and forwards player input with
/// [`Engine::apply`]; after each step it may render [`Engine::snapshot`].
///
/// # Commands and primitives
///
/// The command methods ([`move_left`](Self::move_left),
/// [`soft_drop`](Self::soft_drop), [`rotate`](Self::rotate),
/// [`hard_drop_and_lock`](Self::hard_drop_and_lock), ...) model player input:
/// they do nothing while the game is paused or over. The lower-level
/// primitives ([`try_move`](Self::try_move), [`try_rotate`](Self::try_rotate),
/// [`hard_drop`](Self::hard_drop), [`lock_active`](Self::lock_active),
/// [`clear_lines`](Self::clear_lines)) act regardless of the session state and
/// exist for tests and tools that build positions step by step.
///
/// # Landing
///
/// When gravity cannot move the active piece down, or after a hard drop, the
/// piece is locked into the grid, full rows are cleared and scored, the next
/// piece becomes active, and a new next piece is drawn. If the new active piece
/// collides at its spawn position the game is over, and every later tick and
/// command is a no-op.
#[derive(Debug, Clone)]
pub struct Engine<S = RandomPieceSource> {
    config: EngineConfig,
    grid: Grid,
    active: Piece,
    next: Piece,
    source: S,
    stats: GameStats,
    state: SessionState,
    fall_timer: Duration,
}

impl Engine<RandomPieceSource> {
    /// Creates an engine drawing pieces uniformly at random with a random seed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, RandomPieceSource::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_source(config, RandomPieceSource::with_seed(seed))
    }
}

impl<S> Engine<S>
where
    S: PieceSource,
{
    /// Creates an engine that takes its pieces from `source`.
    ///
    /// The first kind drawn becomes the active piece and the second the next piece.
    pub fn with_source(config: EngineConfig, mut source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let active = Piece::spawn(source.next_kind(), config.columns);
        let next = Piece::spawn(source.next_kind(), config.columns);
        debug!(
            columns = config.columns,
            rows = config.rows,
            "created engine"
        );
        Ok(Self {
            config,
            grid: Grid::new(config.columns, config.rows),
            active,
            next,
            source,
            stats: GameStats::new(),
            state: SessionState::Playing,
            fall_timer: Duration::ZERO,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the grid for direct editing.
    ///
    /// Nothing checks that the active piece stays clear of cells filled this way.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Replaces the active piece.
    ///
    /// Fails, leaving the engine unchanged, if `piece` collides with the grid.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.collides(&piece, 0, 0) {
            return Err(PieceCollisionError);
        }
        self.active = piece;
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns the gravity interval at the current level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.config.fall_interval(self.level())
    }

    /// Draws a kind from the piece source and returns it at the spawn position.
    ///
    /// The grid is not touched.
    pub fn spawn_piece(&mut self) -> Piece {
        let piece = Piece::spawn(self.source.next_kind(), self.config.columns);
        debug!(kind = %piece.kind().as_char(), x = piece.position().x(), "spawned piece");
        piece
    }

    /// Tests whether `piece` translated by `(dx, dy)` collides with the grid.
    ///
    /// See [`Grid::is_colliding`] for the exact rules.
    #[must_use]
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        self.grid.is_colliding(piece, dx, dy)
    }

    /// Translates the active piece by `(dx, dy)` unless that would collide.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.collides(&self.active, dx, dy) {
            return false;
        }
        self.active = self.active.shifted(dx, dy);
        true
    }

    /// Rotates the active piece clockwise, kicking it sideways if needed.
    ///
    /// If the rotated piece collides in place, column offsets −1, +1, −2, +2
    /// are tried in that order and the first free one is kept. When all of
    /// them collide the piece is left as it was and `false` is returned.
    pub fn try_rotate(&mut self) -> bool {
        let rotated = self.active.rotated();
        if !self.collides(&rotated, 0, 0) {
            self.active = rotated;
            return true;
        }
        for dx in KICK_OFFSETS {
            if !self.collides(&rotated, dx, 0) {
                debug!(kind = %rotated.kind().as_char(), offset = dx, "rotation kicked");
                self.active = rotated.shifted(dx, 0);
                return true;
            }
        }
        false
    }

    /// Moves the active piece straight down as far as it goes, without locking.
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> usize {
        let mut rows = 0;
        while self.try_move(0, 1) {
            rows += 1;
        }
        rows
    }

    /// Returns the active piece at the position a hard drop would leave it.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.active;
        while !self.collides(&ghost, 0, 1) {
            ghost = ghost.shifted(0, 1);
        }
        ghost
    }

    /// Writes the active piece into the grid.
    ///
    /// Cells outside the grid are dropped. The active piece itself is left in
    /// place; the next landing or [`set_active_piece`](Self::set_active_piece)
    /// replaces it.
    pub fn lock_active(&mut self) {
        self.grid.fill_piece(&self.active);
        self.stats.record_lock();
        let position = self.active.position();
        debug!(
            kind = %self.active.kind().as_char(),
            x = position.x(),
            y = position.y(),
            "locked piece"
        );
    }

    /// Removes full rows and scores them. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let cleared = self.grid.clear_lines();
        if cleared > 0 {
            self.stats.record_line_clear(cleared);
            info!(
                cleared,
                lines = self.lines(),
                level = self.level(),
                score = self.score(),
                "cleared lines"
            );
        }
        cleared
    }

    /// Advances gravity by `elapsed`.
    ///
    /// Once the accumulated time exceeds the fall interval the accumulator is
    /// reset and the active piece moves down one row, landing if it cannot.
    /// Does nothing while paused or after game over.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.is_playing() {
            return;
        }
        self.fall_timer = self.fall_timer.saturating_add(elapsed);
        if self.fall_timer <= self.fall_interval() {
            return;
        }
        self.fall_timer = Duration::ZERO;
        if !self.try_move(0, 1) {
            self.land();
        }
    }

    fn land(&mut self) {
        self.lock_active();
        self.clear_lines();
        self.active = self.next;
        self.next = self.spawn_piece();
        self.fall_timer = Duration::ZERO;

        if self.collides(&self.active, 0, 0) {
            self.state = SessionState::GameOver;
            info!(
                score = self.score(),
                lines = self.lines(),
                level = self.level(),
                pieces = self.stats.completed_pieces(),
                "game over"
            );
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.state.is_playing() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.state.is_playing() && self.try_move(1, 0)
    }

    /// Moves the active piece down one row, scoring one point if it moved.
    pub fn soft_drop(&mut self) -> bool {
        if !self.state.is_playing() || !self.try_move(0, 1) {
            return false;
        }
        self.stats.add_soft_drop(1);
        true
    }

    pub fn rotate(&mut self) -> bool {
        self.state.is_playing() && self.try_rotate()
    }

    /// Hard drops the active piece and lands it immediately.
    pub fn hard_drop_and_lock(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.hard_drop();
        self.land();
        true
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Applies a player command. Returns `true` if it changed the game.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop_and_lock(),
            Command::TogglePause => {
                let before = self.state;
                self.toggle_pause();
                before != self.state
            }
        }
    }

    /// Applies a command given by its kebab-case name.
    ///
    /// Unknown names are ignored.
    pub fn apply_named(&mut self, name: &str) -> bool {
        let Some(command) = Command::from_name(name) else {
            debug!(name, "ignoring unknown command");
            return false;
        };
        self.apply(command)
    }

    /// Returns an owned copy of the state a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            active: PieceView::from(&self.active),
            ghost: PieceView::from(&self.ghost_piece()),
            next: PieceView::from(&self.next),
            state: self.state,
            score: self.score(),
            lines: self.lines(),
            level: self.level(),
            stats: self.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, PieceKind, PiecePosition, SequencePieceSource};

    use super::*;

    fn engine_with(kinds: &[PieceKind]) -> Engine<SequencePieceSource> {
        Engine::with_source(
            EngineConfig::default(),
            SequencePieceSource::new(kinds.to_vec()),
        )
        .unwrap()
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Engine>();
        assert_send::<Snapshot>();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            rows: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            Engine::new(config).unwrap_err(),
            ConfigError::InvalidRows { rows: 1 }
        );
    }

    #[test]
    fn test_first_two_kinds_become_active_and_next() {
        let engine = engine_with(&[PieceKind::T, PieceKind::L, PieceKind::I]);
        assert_eq!(engine.active_piece().kind(), PieceKind::T);
        assert_eq!(engine.next_piece().kind(), PieceKind::L);
        assert_eq!(engine.active_piece().position(), PiecePosition::new(4, 0));
        assert!(engine.session_state().is_playing());
    }

    #[test]
    fn test_ghost_piece_does_not_move_active() {
        let engine = engine_with(&[PieceKind::I]);
        let ghost = engine.ghost_piece();
        assert_eq!(ghost.position(), PiecePosition::new(3, 19));
        assert_eq!(engine.active_piece().position(), PiecePosition::new(3, 0));
        assert_eq!(engine.snapshot().ghost.position, ghost.position());
    }

    #[test]
    fn test_set_active_piece_rejects_collision() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().set_cell(0, 19, Cell::Piece(PieceKind::Z));

        let blocked = Piece::new(PieceKind::O, PiecePosition::new(0, 18));
        assert!(engine.set_active_piece(blocked).is_err());
        assert_eq!(engine.active_piece().position(), PiecePosition::new(4, 0));

        let free = Piece::new(PieceKind::O, PiecePosition::new(1, 18));
        assert!(engine.set_active_piece(free).is_ok());
        assert_eq!(engine.active_piece(), &free);
    }

    #[test]
    fn test_apply_named() {
        let mut engine = engine_with(&[PieceKind::T]);
        assert!(engine.apply_named("move-left"));
        assert_eq!(engine.active_piece().position().x(), 3);
        assert!(!engine.apply_named("hold"));
        assert!(!engine.apply_named("MOVE-LEFT"));
        assert_eq!(engine.active_piece().position().x(), 3);
    }

    #[test]
    fn test_soft_drop_at_floor_scores_nothing() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.hard_drop();
        assert!(!engine.soft_drop());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_toggle_pause_reports_change() {
        let mut engine = engine_with(&[PieceKind::O]);
        assert!(engine.apply(Command::TogglePause));
        assert!(engine.is_paused());
        assert!(engine.apply(Command::TogglePause));
        assert!(!engine.is_paused());
    }
}
