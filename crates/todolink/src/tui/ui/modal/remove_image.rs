/*
[INPUT]:  Pending image selected for removal
[OUTPUT]: Removal confirmation modal with a preview of the image
[POS]:    TUI UI modal for confirming image removal
[UPDATE]: When changing the confirmation dialog
*/

use crossterm::event::KeyCode;

use todolink::Thumbnail;

use super::{Field, Modal, ModalAction, handle_modal_key};

/// Index of the Cancel button; focused when the dialog opens
const CANCEL_INDEX: usize = 2;

pub(in crate::tui) struct RemoveImageModal {
    index: usize,
    name: String,
    thumbnail: Option<Thumbnail>,
    focus_index: usize,
}

impl RemoveImageModal {
    pub(in crate::tui) fn new(index: usize, name: String, thumbnail: Option<Thumbnail>) -> Self {
        Self {
            index,
            name,
            thumbnail,
            focus_index: CANCEL_INDEX,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: "Remove image?".to_string(),
            focus_index: self.focus_index,
            fields: vec![
                Field::Preview {
                    caption: format!("#{} {}", self.index + 1, self.name),
                    thumbnail: self.thumbnail.clone(),
                },
                Field::Button {
                    label: "Remove".to_string(),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: "Cancel".to_string(),
                    action: ModalAction::Cancel,
                },
            ],
            hint: Some("The image will not be attached to the task.".to_string()),
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.focus_index = modal.focus_index;
        action
    }
}
