/*
[INPUT]:  AppState image picker and image cursor
[OUTPUT]: Pending image slots with thumbnails rendered into Ratatui frame
[POS]:    TUI UI attachment widget rendering
[UPDATE]: When changing the attachment widget layout
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use todolink::attachments::{PendingImage, PreviewSource};

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, focused_border_style};
use crate::tui::ui::thumbnail_lines;

pub(in crate::tui) fn draw_attachments(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let focused = app.focus == Focus::Images && app.active_modal.is_none();
    let limits = app.picker.limits();
    let title = format!("Images {}/{}", app.picker.len(), limits.max_images);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { focused_border_style() } else { border_style() })
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.picker.is_empty() {
        let hint = vec![
            Line::from("Press [a] to browse, or drop image files onto the terminal"),
            Line::from(Span::styled(limits.hint(), Style::default().add_modifier(Modifier::DIM))),
        ];
        frame.render_widget(Paragraph::new(hint), inner);
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, limits.max_images as u32); limits.max_images])
        .split(inner);

    for (index, (image, slot)) in app.picker.images().iter().zip(slots.iter()).enumerate() {
        let selected = focused && index == app.image_cursor;
        draw_slot(frame, *slot, image, &app.image_base_url, selected);
    }
}

fn draw_slot(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    image: &PendingImage,
    image_base_url: &str,
    selected: bool,
) {
    let mut lines = slot_preview(image, image_base_url);
    let caption_style = if selected {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default()
    };
    lines.push(Line::from(Span::styled(image.label().to_string(), caption_style)));
    frame.render_widget(Paragraph::new(lines), area);
}

fn slot_preview(image: &PendingImage, image_base_url: &str) -> Vec<Line<'static>> {
    match (image.thumbnail(), image.preview_source(image_base_url)) {
        (Some(thumbnail), _) => thumbnail_lines(thumbnail),
        (None, PreviewSource::Local(_)) => vec![Line::from("[no preview]")],
        (None, PreviewSource::Remote(url)) => vec![
            Line::from("[stored image]"),
            Line::from(Span::styled(url, Style::default().fg(Color::DarkGray))),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn remote_slot_shows_public_url() {
        let image = PendingImage::Remote {
            key: "abc".to_string(),
        };
        let lines = slot_preview(&image, "https://x.supabase.co/storage/v1/object/public/images/");
        assert_eq!(
            text(&lines),
            vec![
                "[stored image]".to_string(),
                "https://x.supabase.co/storage/v1/object/public/images/abc".to_string(),
            ]
        );
    }

    #[test]
    fn undecodable_local_slot_has_placeholder() {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.resize(32, 0);
        let image = PendingImage::Local(todolink::LocalImage::from_bytes("a.png", bytes).expect("png magic"));
        assert_eq!(text(&slot_preview(&image, "https://x")), vec!["[no preview]".to_string()]);
    }
}
