/*
[INPUT]:  Crossterm key and paste events
[OUTPUT]: TUI event routing to AppState actions and modals
[POS]:    TUI event handling
[UPDATE]: When changing keybindings or paste handling
*/

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::InputRequest;

use todolink::attachments::parse_dropped_paths;

use super::app::{ActiveModal, AppState, Focus, Tab};
use super::ui::modal::ModalAction;

/// Handles a terminal event.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_event(app: &mut AppState, event: CrosstermEvent) -> bool {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key).await,
        CrosstermEvent::Paste(text) => {
            handle_paste(app, &text).await;
            false
        }
        _ => false,
    }
}

pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    if app.active_modal.is_some() {
        handle_modal_key_event(app, key.code).await;
        return false;
    }
    if app.current_tab == Tab::Tasks && app.focus == Focus::Label {
        handle_label_key(app, key).await;
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('x') => {
            app.dismiss_toast();
        }
        KeyCode::Char('l') => app.next_tab(),
        KeyCode::Char('1') => app.set_tab(Tab::Tasks),
        KeyCode::Char('2') => app.set_tab(Tab::Logs),
        KeyCode::Char('r') => {
            app.refresh_tasks().await;
            app.status_message = "refreshed".to_string();
        }
        _ if app.current_tab == Tab::Logs => {}
        KeyCode::Tab => app.next_focus(),
        KeyCode::Char('i') | KeyCode::Char('n') => app.focus = Focus::Label,
        KeyCode::Char('a') => app.open_add_image(),
        code => match app.focus {
            Focus::Tasks => handle_task_list_key(app, code).await,
            Focus::Images => handle_images_key(app, code),
            Focus::Label => {}
        },
    }
    false
}

async fn handle_label_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.submit_task().await,
        KeyCode::Tab => app.next_focus(),
        KeyCode::Esc => {
            if !app.dismiss_toast() {
                app.focus = Focus::Tasks;
            }
        }
        KeyCode::Char('o') if ctrl => app.open_add_image(),
        code => {
            if let Some(request) = input_request(code, ctrl) {
                app.label.handle(request);
            }
        }
    }
}

async fn handle_task_list_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected().await,
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected().await,
        _ => {}
    }
}

fn handle_images_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.move_image_cursor(-1),
        KeyCode::Right => app.move_image_cursor(1),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.request_image_removal(),
        _ => {}
    }
}

async fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    match app.active_modal.as_mut() {
        Some(ActiveModal::AddImage(modal)) => match modal.handle_key(key) {
            ModalAction::Submit => {
                let paths = parse_dropped_paths(modal.path());
                if paths.is_empty() {
                    app.status_message = "enter the path of an image file".to_string();
                } else if app.attach_files(paths).await {
                    app.close_modal();
                }
            }
            ModalAction::Cancel => app.close_modal(),
            ModalAction::None => {}
        },
        Some(ActiveModal::RemoveImage(modal)) => match modal.handle_key(key) {
            ModalAction::Submit => app.confirm_image_removal(),
            ModalAction::Cancel => app.cancel_image_removal(),
            ModalAction::None => {}
        },
        None => {}
    }
}

/// Pasted text is either dropped files or label text
async fn handle_paste(app: &mut AppState, text: &str) {
    match app.active_modal.as_mut() {
        Some(ActiveModal::AddImage(modal)) => {
            modal.insert_text(text);
            return;
        }
        Some(ActiveModal::RemoveImage(_)) => return,
        None => {}
    }

    let paths = parse_dropped_paths(text);
    if !paths.is_empty() && paths.iter().all(|path| path.is_file()) {
        tracing::debug!(count = paths.len(), "files dropped");
        app.attach_files(paths).await;
    } else if app.current_tab == Tab::Tasks && app.focus == Focus::Label {
        for ch in text.chars() {
            let ch = if ch.is_control() { ' ' } else { ch };
            app.label.handle(InputRequest::InsertChar(ch));
        }
    } else {
        app.status_message = "pasted text is not a list of image files".to_string();
    }
}

fn input_request(key: KeyCode, ctrl: bool) -> Option<InputRequest> {
    let request = match key {
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(ch) => InputRequest::InsertChar(ch),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}
