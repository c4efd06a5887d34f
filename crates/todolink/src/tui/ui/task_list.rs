/*
[INPUT]:  AppState task list and selection
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When changing how task rows are shown
*/

use chrono::Local;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use unicode_width::UnicodeWidthChar;

use todolink::format::format_created_date;

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, focused_border_style};

/// Columns taken by the highlight symbol, the check mark, the date and `[img]`
const ROW_CHROME_WIDTH: usize = 2 + 4 + 12 + 7;

pub(in crate::tui) fn draw_task_list(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &mut AppState) {
    let focused = app.focus == Focus::Tasks && app.active_modal.is_none();
    let label_width = (area.width.saturating_sub(2) as usize).saturating_sub(ROW_CHROME_WIDTH).max(8);
    let items = if app.tasks().is_empty() {
        vec![ListItem::new("No tasks yet")]
    } else {
        app.tasks()
            .iter()
            .map(|task| {
                let (mark, label_style) = if task.complete {
                    (
                        "[x] ",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ] ", Style::default())
                };
                let mut spans = vec![
                    Span::raw(mark),
                    Span::styled(fit_width(&task.task, label_width), label_style),
                    Span::styled(
                        format!("  {}", format_created_date(&task.created_at, &Local)),
                        Style::default().fg(Color::Gray),
                    ),
                ];
                if task.image_key().is_some() {
                    spans.push(Span::styled("  [img]", Style::default().fg(Color::Cyan)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let title = format!("Tasks ({})", app.tasks().len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused { focused_border_style() } else { border_style() })
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`
fn fit_width(text: &str, max: usize) -> String {
    let widths: Vec<usize> = text.chars().map(|ch| ch.width().unwrap_or(0)).collect();
    if widths.iter().sum::<usize>() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for (ch, width) in text.chars().zip(widths) {
        if used + width + 1 > max {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}
