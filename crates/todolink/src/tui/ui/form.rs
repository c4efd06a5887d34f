/*
[INPUT]:  AppState label input and focus
[OUTPUT]: New-task label field rendered into Ratatui frame
[POS]:    TUI UI task form rendering
[UPDATE]: When changing the task form
*/

use ratatui::layout::Position;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, focused_border_style};

pub(in crate::tui) fn draw_task_form(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let focused = app.focus == Focus::Label && app.active_modal.is_none();
    let width = area.width.saturating_sub(2) as usize;
    let scroll = app.label.visual_scroll(width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { focused_border_style() } else { border_style() })
        .title("New task [Enter] Submit");

    let widget = if app.label.value().is_empty() && !focused {
        Paragraph::new("What needs to be done?").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.label.value()).scroll((0, scroll as u16))
    };
    frame.render_widget(widget.block(block), area);

    if focused {
        let cursor = app.label.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position(Position::new(area.x + 1 + cursor, area.y + 1));
    }
}
