/*
[INPUT]:  Visible toasts
[OUTPUT]: Toast stack rendered over the top-right corner
[POS]:    TUI UI notification overlay
[UPDATE]: When changing toast presentation
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use todolink::{ToastLevel, Toasts};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

pub(in crate::tui) fn draw_toasts(frame: &mut ratatui::Frame, area: Rect, toasts: &Toasts) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    // Newest on top
    for (slot, toast) in toasts.iter().rev().enumerate() {
        let y = area.y + 1 + slot as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = match toast.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::LightRed,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                toast.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from("[Esc] dismiss").right_aligned());
        let body = Paragraph::new(toast.description.as_str())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}
