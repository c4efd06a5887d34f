/*
[INPUT]:  Typed or pasted file paths
[OUTPUT]: Browse-for-image modal state
[POS]:    TUI UI modal for attaching images by path
[UPDATE]: When changing the browse form
*/

use crossterm::event::KeyCode;

use super::{Field, Modal, ModalAction, handle_modal_key};

pub(in crate::tui) struct AddImageModal {
    path: String,
    hint: String,
    focus_index: usize,
}

impl AddImageModal {
    pub(in crate::tui) fn new(hint: String) -> Self {
        Self {
            path: String::new(),
            hint,
            focus_index: 0,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: "Attach images".to_string(),
            focus_index: self.focus_index,
            fields: vec![
                Field::TextInput {
                    label: "Path".to_string(),
                    value: self.path.clone(),
                },
                Field::Button {
                    label: "Attach".to_string(),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: "Cancel".to_string(),
                    action: ModalAction::Cancel,
                },
            ],
            hint: Some(format!("{}. Separate several paths with spaces.", self.hint)),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    /// Append pasted text to the path field
    pub(in crate::tui) fn insert_text(&mut self, text: &str) {
        if !self.path.is_empty() && !self.path.ends_with(' ') {
            self.path.push(' ');
        }
        self.path.push_str(text.trim());
        self.focus_index = 0;
    }

    pub(in crate::tui) fn path(&self) -> &str {
        &self.path
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.first() {
            self.path = value.clone();
        }
    }
}
