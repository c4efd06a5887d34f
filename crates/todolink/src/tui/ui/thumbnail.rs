/*
[INPUT]:  Decoded Thumbnail pixel grid
[OUTPUT]: Ratatui lines drawing the thumbnail with upper half-block glyphs
[POS]:    TUI UI thumbnail rendering
[UPDATE]: When changing how image previews are drawn
*/

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use todolink::Thumbnail;

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// One line per cell row: foreground is the top pixel, background the bottom one
pub(in crate::tui) fn thumbnail_lines(thumbnail: &Thumbnail) -> Vec<Line<'static>> {
    (0..thumbnail.rows())
        .map(|row| {
            let spans = (0..thumbnail.columns())
                .map(|column| {
                    let (top, bottom) = thumbnail.cell(column, row);
                    let mut style = Style::default().fg(rgb(top));
                    if let Some(bottom) = bottom {
                        style = style.bg(rgb(bottom));
                    }
                    Span::styled(UPPER_HALF_BLOCK, style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
