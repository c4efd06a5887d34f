/*
[INPUT]:  Selected task and cached stored-image previews
[OUTPUT]: Task detail panel rendered into Ratatui frame
[POS]:    TUI UI task detail rendering
[UPDATE]: When changing the task detail panel
*/

use chrono::Local;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use todolink::format::{format_created_date, public_image_url};

use crate::tui::app::{AppState, RemoteThumbnail};
use crate::tui::runtime::border_style;
use crate::tui::ui::thumbnail_lines;

pub(in crate::tui) fn draw_task_detail(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Details");

    let Some(task) = app.selected_task() else {
        frame.render_widget(Paragraph::new("Select a task").block(block), area);
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(task.task.clone(), bold)),
        Line::from(format!("Created: {}", format_created_date(&task.created_at, &Local))),
        Line::from(if task.complete { "Status: complete" } else { "Status: open" }),
    ];

    if let Some(key) = task.image_key() {
        lines.push(Line::default());
        match app.thumbnails.get(key) {
            Some(RemoteThumbnail::Ready(thumbnail)) => lines.extend(thumbnail_lines(thumbnail)),
            Some(RemoteThumbnail::Unavailable) => lines.push(Line::from("[image unavailable]")),
            Some(RemoteThumbnail::Loading) | None => lines.push(Line::from("[loading image...]")),
        }
        lines.push(Line::from(Span::styled(
            public_image_url(&app.image_base_url, key),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}
