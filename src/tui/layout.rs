//! Root layout and card grid geometry.
//!
//! Geometry is computed by pure functions so mouse hit-testing and rendering
//! always agree on where each card and portrait lives.

use ratatui::layout::{Constraint, Layout, Position, Rect};

/// Minimum card width; the grid fits as many columns as this allows.
pub const CARD_MIN_WIDTH: u16 = 44;
/// Fixed card height including borders.
pub const CARD_HEIGHT: u16 = 14;
/// Portrait column width inside a card (cells).
pub const PORTRAIT_WIDTH: u16 = 14;
/// Cards narrower than this drop the portrait column.
pub const PORTRAIT_MIN_CARD_WIDTH: u16 = 36;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Title row.
    pub header: Rect,
    /// Card container.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        AppLayout {
            header: rows[0],
            main: rows[1],
            status: rows[2],
        }
    }
}

/// Placement of the visible cards inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    /// Cards per row.
    pub columns: usize,
    /// Whole rows that fit in the container.
    pub visible_rows: usize,
    /// `(card index, area)` for every card on screen.
    pub cells: Vec<(usize, Rect)>,
}

impl CardGrid {
    /// Lay out `count` cards in `area`, starting at grid row `scroll_row`.
    pub fn compute(area: Rect, count: usize, scroll_row: usize) -> Self {
        let columns = Self::columns_for(area.width);
        let visible_rows = Self::rows_for(area.height);

        let card_width = if columns == 0 { 0 } else { area.width / columns as u16 };
        let mut cells = Vec::new();

        for row in 0..visible_rows {
            let y = area.y + row as u16 * CARD_HEIGHT;
            if y >= area.bottom() {
                break;
            }
            let height = CARD_HEIGHT.min(area.bottom() - y);
            for col in 0..columns {
                let index = (scroll_row + row) * columns + col;
                if index >= count {
                    break;
                }
                let x = area.x + col as u16 * card_width;
                cells.push((index, Rect::new(x, y, card_width, height)));
            }
        }

        Self {
            columns,
            visible_rows,
            cells,
        }
    }

    /// Number of columns that fit `width` (at least one).
    pub fn columns_for(width: u16) -> usize {
        usize::from((width / CARD_MIN_WIDTH).max(1))
    }

    /// Number of whole rows that fit `height` (at least one).
    pub fn rows_for(height: u16) -> usize {
        usize::from((height / CARD_HEIGHT).max(1))
    }

    /// Card (index and area) under a screen position, if any.
    pub fn card_at(&self, position: Position) -> Option<(usize, Rect)> {
        self.cells
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .copied()
    }

    /// Range of card indices currently on screen.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().map(|(index, _)| *index)
    }
}

/// Portrait column inside a card, or `None` when the card is too narrow.
pub fn portrait_area(card: Rect) -> Option<Rect> {
    if card.width < PORTRAIT_MIN_CARD_WIDTH || card.height < 3 {
        return None;
    }
    let inner = inner(card);
    Some(Rect::new(inner.x, inner.y, PORTRAIT_WIDTH, inner.height))
}

/// Text column inside a card (everything right of the portrait).
pub fn text_area(card: Rect) -> Rect {
    let inner = inner(card);
    match portrait_area(card) {
        Some(portrait) => {
            let x = portrait.right() + 1;
            Rect::new(x, inner.y, inner.right().saturating_sub(x), inner.height)
        }
        None => inner,
    }
}

/// Area inside a one-cell border.
fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_rows() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = AppLayout::compute(area);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.main.height, 38);
        assert_eq!(layout.main.width, 120);
    }

    #[test]
    fn test_grid_columns_and_rows() {
        let area = Rect::new(0, 1, 132, 38);
        let grid = CardGrid::compute(area, 100, 0);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.visible_rows, 2);
        assert_eq!(grid.cells.len(), 6);
        assert_eq!(grid.cells[0], (0, Rect::new(0, 1, 44, CARD_HEIGHT)));
        assert_eq!(grid.cells[4].0, 4);
        assert_eq!(grid.cells[4].1.y, 1 + CARD_HEIGHT);
    }

    #[test]
    fn test_grid_respects_scroll_and_count() {
        let area = Rect::new(0, 0, 88, 28);
        let grid = CardGrid::compute(area, 5, 1);
        // Row 1 holds cards 2 and 3, row 2 holds card 4.
        let indices: Vec<_> = grid.visible_indices().collect();
        assert_eq!(indices, vec![2, 3, 4]);
    }

    #[test]
    fn test_grid_narrow_terminal_has_one_column() {
        let area = Rect::new(0, 0, 20, 5);
        let grid = CardGrid::compute(area, 3, 0);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.visible_rows, 1);
        assert_eq!(grid.cells.len(), 1);
        assert_eq!(grid.cells[0].1.height, 5);
    }

    #[test]
    fn test_card_at() {
        let area = Rect::new(0, 0, 88, 28);
        let grid = CardGrid::compute(area, 4, 0);
        assert_eq!(grid.card_at(Position::new(1, 1)), Some((0, Rect::new(0, 0, 44, CARD_HEIGHT))));
        assert_eq!(grid.card_at(Position::new(50, 20)).map(|(i, _)| i), Some(3));
        let empty = CardGrid::compute(area, 0, 0);
        assert_eq!(empty.card_at(Position::new(1, 1)), None);
    }

    #[test]
    fn test_portrait_and_text_areas() {
        let card = Rect::new(0, 0, 44, CARD_HEIGHT);
        let portrait = portrait_area(card).unwrap();
        assert_eq!(portrait, Rect::new(1, 1, PORTRAIT_WIDTH, CARD_HEIGHT - 2));
        let text = text_area(card);
        assert_eq!(text.x, portrait.right() + 1);
        assert_eq!(text.right(), 43);

        let narrow = Rect::new(0, 0, 30, CARD_HEIGHT);
        assert!(portrait_area(narrow).is_none());
        assert_eq!(text_area(narrow), Rect::new(1, 1, 28, CARD_HEIGHT - 2));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.x + centered.width <= area.width);
        assert!(centered.y + centered.height <= area.height);
    }
}
