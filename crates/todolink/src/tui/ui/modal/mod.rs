/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding field kinds or modal dialogs
*/

mod add_image;
mod remove_image;

pub(in crate::tui) use add_image::AddImageModal;
pub(in crate::tui) use remove_image::RemoveImageModal;

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use todolink::Thumbnail;

use crate::tui::runtime::border_style;
use crate::tui::ui::thumbnail_lines;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    pub(super) hint: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
    },
    /// Image preview; never takes focus
    Preview {
        caption: String,
        thumbnail: Option<Thumbnail>,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

impl Field {
    fn focusable(&self) -> bool {
        !matches!(self, Field::Preview { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (index, field) in modal.fields.iter().enumerate() {
        let style = if index == modal.focus_index {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        match field {
            Field::TextInput { label, value } => {
                lines.push(Line::from(Span::styled(format!("{label}: {value}_"), style)));
            }
            Field::Preview { caption, thumbnail } => {
                match thumbnail {
                    Some(thumbnail) => lines.extend(thumbnail_lines(thumbnail)),
                    None => lines.push(Line::from("[no preview]")),
                }
                lines.push(Line::from(caption.as_str()));
            }
            Field::Button { label, .. } => {
                lines.push(Line::from(Span::styled(format!("[{label}]"), style)));
            }
        }
    }
    if let Some(hint) = &modal.hint {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            hint.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            move_focus(modal, 1);
            ModalAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_focus(modal, -1);
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => match modal.fields.get(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            Some(Field::TextInput { .. }) => ModalAction::Submit,
            _ => ModalAction::None,
        },
        _ => ModalAction::None,
    }
}

/// Move focus to the next focusable field in `step` direction, wrapping
fn move_focus(modal: &mut Modal, step: isize) {
    let len = modal.fields.len() as isize;
    if len == 0 {
        return;
    }
    let mut index = modal.focus_index as isize;
    for _ in 0..len {
        index = (index + step).rem_euclid(len);
        if modal.fields[index as usize].focusable() {
            modal.focus_index = index as usize;
            return;
        }
    }
}

pub(in crate::tui) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
