//! Half-block portrait widget.
//!
//! Each terminal cell shows two vertically stacked pixels using `▀`: the
//! foreground paints the upper pixel and the background the lower one. The
//! image is scaled to fit the area with its aspect ratio preserved and
//! centered.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Color,
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::tui::portraits::Portrait;
use crate::tui::theme;

const UPPER_HALF_BLOCK: &str = "▀";

/// Draws a decoded [`Portrait`] with half blocks.
pub struct PortraitWidget<'a> {
    portrait: &'a Portrait,
}

impl<'a> PortraitWidget<'a> {
    pub fn new(portrait: &'a Portrait) -> Self {
        Self { portrait }
    }

    /// Cell size the portrait occupies inside `area`: `(columns, rows)`.
    pub fn fitted_size(&self, area: Rect) -> (u16, u16) {
        let (img_w, img_h) = (self.portrait.width(), self.portrait.height());
        if img_w == 0 || img_h == 0 || area.width == 0 || area.height == 0 {
            return (0, 0);
        }

        // Each cell is one pixel wide and two pixels tall.
        let max_w = u32::from(area.width);
        let max_h = u32::from(area.height) * 2;
        let (out_w, out_h) = if img_w * max_h >= img_h * max_w {
            (max_w, (img_h * max_w / img_w).max(1))
        } else {
            ((img_w * max_h / img_h).max(1), max_h)
        };

        (out_w as u16, out_h.div_ceil(2) as u16)
    }
}

impl Widget for PortraitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.fitted_size(area);
        if cols == 0 || rows == 0 {
            return;
        }

        let (img_w, img_h) = (self.portrait.width(), self.portrait.height());
        let px_rows = u32::from(rows) * 2;
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        for cy in 0..rows {
            for cx in 0..cols {
                let sx = u32::from(cx) * img_w / u32::from(cols);
                let top_y = u32::from(cy) * 2 * img_h / px_rows;
                let bottom_y = (u32::from(cy) * 2 + 1) * img_h / px_rows;

                let [tr, tg, tb] = self.portrait.pixel(sx, top_y);
                let [br, bg, bb] = self.portrait.pixel(sx, bottom_y);

                if let Some(cell) = buf.cell_mut((x0 + cx, y0 + cy)) {
                    cell.set_symbol(UPPER_HALF_BLOCK)
                        .set_fg(Color::Rgb(tr, tg, tb))
                        .set_bg(Color::Rgb(br, bg, bb));
                }
            }
        }
    }
}

/// Text shown where a portrait is not (yet) available.
pub struct PortraitPlaceholder<'a> {
    label: &'a str,
}

impl<'a> PortraitPlaceholder<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label }
    }
}

impl Widget for PortraitPlaceholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let top_padding = area.height.saturating_sub(1) / 2;
        let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::raw("")).collect();
        lines.push(Line::styled(self.label, theme::dim()));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_tone(width: u32, height: u32) -> Portrait {
        Portrait::from_rgb(RgbImage::from_fn(width, height, |_, y| {
            if y < height / 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        }))
    }

    #[test]
    fn test_fitted_size_square_in_tall_area() {
        let portrait = two_tone(10, 10);
        let widget = PortraitWidget::new(&portrait);
        // 14 columns, 12 rows = 14x24 px; a square fits as 14x14 px = 7 rows.
        assert_eq!(widget.fitted_size(Rect::new(0, 0, 14, 12)), (14, 7));
    }

    #[test]
    fn test_fitted_size_limited_by_height() {
        let portrait = two_tone(10, 40);
        let widget = PortraitWidget::new(&portrait);
        assert_eq!(widget.fitted_size(Rect::new(0, 0, 14, 4)), (2, 4));
    }

    #[test]
    fn test_render_paints_half_blocks() {
        let portrait = two_tone(2, 2);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        PortraitWidget::new(&portrait).render(area, &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), UPPER_HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_placeholder_renders_label() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        PortraitPlaceholder::new("sem imagem").render(area, &mut buf);
        let row: String = (0..12).map(|x| buf.cell((x, 1)).unwrap().symbol().to_string()).collect();
        assert!(row.contains("sem imagem"));
    }
}
