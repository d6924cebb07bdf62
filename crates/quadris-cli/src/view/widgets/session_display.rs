use quadris_engine::{SessionState, Snapshot};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// The whole play screen: stats on the left, the board in the middle and the
/// next piece on the right.
#[derive(Debug)]
pub(crate) struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, show_ghost: bool) -> Self {
        Self {
            snapshot,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub(crate) fn height(&self) -> u16 {
        let (session_stats, game_board, next_panel) = self.panels();
        game_board
            .height()
            .max(session_stats.height())
            .max(next_panel.height())
    }

    fn border_color(&self) -> Color {
        match self.snapshot.state {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panels(&self) -> (SessionStatsDisplay<'a>, BoardDisplay<'a>, PieceDisplay<'a>) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_color();
        let snapshot = self.snapshot;

        let session_stats = SessionStatsDisplay::new(snapshot).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let game_board = {
            let widget = BoardDisplay::new(&snapshot.grid)
                .active(snapshot.active)
                .block(
                    Block::bordered()
                        .border_style(border_style)
                        .style(style::DEFAULT),
                );
            if self.show_ghost {
                widget.ghost(snapshot.ghost)
            } else {
                widget
            }
        };

        let next_panel = PieceDisplay::new()
            .piece(snapshot.next.kind, snapshot.next.matrix)
            .block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        (session_stats, game_board, next_panel)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (session_stats, game_board, next_panel) = self.panels();

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.snapshot.state {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use quadris_engine::{Command, Engine, EngineConfig, PieceKind, SequencePieceSource};

    use super::*;

    fn snapshot_after(commands: &[Command]) -> Snapshot {
        let source = SequencePieceSource::new(vec![PieceKind::O, PieceKind::T]);
        let mut engine = Engine::with_source(EngineConfig::default(), source).unwrap();
        for command in commands {
            engine.apply(*command);
        }
        engine.snapshot()
    }

    fn render(snapshot: &Snapshot) -> Buffer {
        let display = SessionDisplay::new(snapshot, true);
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| {
            let line: String = (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.contains(needle)
        })
    }

    #[test]
    fn test_height_fits_board() {
        let snapshot = snapshot_after(&[]);
        let display = SessionDisplay::new(&snapshot, true);
        assert_eq!(display.height(), 22);
    }

    #[test]
    fn test_panels_are_titled() {
        let buf = render(&snapshot_after(&[]));
        assert!(contains(&buf, "STATS"));
        assert!(contains(&buf, "NEXT"));
        assert!(contains(&buf, "SCORE:"));
        assert!(!contains(&buf, "PAUSED"));
    }

    #[test]
    fn test_pause_shows_popup() {
        let buf = render(&snapshot_after(&[Command::TogglePause]));
        assert!(contains(&buf, "PAUSED"));
    }
}
