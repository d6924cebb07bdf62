use std::iter;

use quadris_engine::{Cell, Grid, PieceView};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::BlockDisplay;

#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<PieceView>,
    active: Option<PieceView>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            active: None,
            block: None,
        }
    }

    pub(crate) fn ghost(self, piece: PieceView) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub(crate) fn active(self, piece: PieceView) -> Self {
        Self {
            active: Some(piece),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        super::cells(self.grid.width()) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        super::cells(self.grid.height()) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn block_at(&self, x: usize, y: usize, cell: Cell) -> BlockDisplay {
        if let Some(active) = &self.active
            && covers(active, x, y)
        {
            return BlockDisplay::piece(active.kind);
        }
        if cell.is_empty()
            && let Some(ghost) = &self.ghost
            && covers(ghost, x, y)
        {
            return BlockDisplay::ghost();
        }
        BlockDisplay::from_cell(cell, true)
    }
}

/// Returns whether `piece` occupies grid cell `(x, y)`.
fn covers(piece: &PieceView, x: usize, y: usize) -> bool {
    let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) else {
        return false;
    };
    let dx = x - i64::from(piece.position.x());
    let dy = y - i64::from(piece.position.y());
    match (usize::try_from(dx), usize::try_from(dy)) {
        (Ok(dx), Ok(dy)) => piece.matrix.is_occupied(dx, dy),
        _ => false,
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.width()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.height()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid_cells, self.grid.rows()).enumerate() {
            for (x, (grid_cell, cell)) in iter::zip(grid_row, row).enumerate() {
                self.block_at(x, y, *cell).render(grid_cell, buf);
            }
        }
    }
}
