use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::pipeline::harmony::Palette;

/// Width of one swatch, in terminal cells.
const SWATCH_WIDTH: usize = 12;
/// Height of one swatch, in terminal rows.
const SWATCH_HEIGHT: usize = 3;

/// Renders a palette as a row of colored swatches with hex labels underneath.
pub struct PaletteWidget<'a> {
    palette: &'a Palette,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

pub(crate) fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn contrast_fg(c: &AppColor) -> Color {
    to_color(&c.readable_text())
}

/// One row of the swatch strip. The middle row carries the slot number.
fn build_swatch_row(palette: &Palette, row: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, c) in palette.colors.iter().enumerate() {
        let label = if row == SWATCH_HEIGHT / 2 {
            format!("{:^width$}", i + 1, width = SWATCH_WIDTH)
        } else {
            " ".repeat(SWATCH_WIDTH)
        };
        spans.push(Span::styled(
            label,
            Style::default().bg(to_color(c)).fg(contrast_fg(c)),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_hex_row(palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for c in &palette.colors {
        spans.push(Span::styled(
            format!("{:^width$}", c.to_hex(), width = SWATCH_WIDTH),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.palette.name);
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        lines.extend((0..SWATCH_HEIGHT).map(|row| build_swatch_row(self.palette, row)));
        lines.push(build_hex_row(self.palette));

        Paragraph::new(lines).render(inner, buf);
    }
}
