use quadris_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One grid cell, drawn two terminal columns wide.
#[derive(Debug)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub(crate) const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) fn width() -> u16 {
        2
    }

    pub(crate) fn height() -> u16 {
        1
    }

    pub(crate) const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub(crate) const fn piece(kind: PieceKind) -> Self {
        Self::new(style::piece(kind), "")
    }

    pub(crate) const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }

    pub(crate) fn from_cell(cell: Cell, show_dots: bool) -> Self {
        cell.kind().map_or_else(|| Self::empty(show_dots), Self::piece)
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
