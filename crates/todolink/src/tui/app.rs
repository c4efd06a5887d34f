/*
[INPUT]:  Task board, image picker, toasts, log buffer
[OUTPUT]: AppState helpers for TUI rendering and task/attachment control
[POS]:    TUI app state
[UPDATE]: When adding panels, modals or actions to the TUI
*/

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tui_input::Input;

use todolink::attachments::{AttachmentError, AttachmentLimits, ImagePicker, LocalImage};
use todolink::{TaskBackend, TaskBoard, Thumbnail, Toasts};
use todolink_adapter::Task;

use crate::tui::LogBufferHandle;
use crate::tui::ui::modal::{AddImageModal, RemoveImageModal};

/// Preview bounds for the selected task's image, in terminal cells
pub(super) const DETAIL_THUMBNAIL_COLUMNS: u32 = 32;
pub(super) const DETAIL_THUMBNAIL_ROWS: u32 = 12;

pub(super) type Board = TaskBoard<Arc<dyn TaskBackend>>;

pub(super) enum ActiveModal {
    AddImage(AddImageModal),
    RemoveImage(RemoveImageModal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Tasks,
    Logs,
}

/// Panel receiving keys on the Tasks tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Label,
    Images,
    Tasks,
}

/// Cached preview of a stored image
pub(super) enum RemoteThumbnail {
    Loading,
    Ready(Thumbnail),
    Unavailable,
}

pub(super) struct AppState {
    pub(super) board: Board,
    pub(super) picker: ImagePicker,
    pub(super) label: Input,
    pub(super) toasts: Toasts,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) list_state: ListState,
    pub(super) image_cursor: usize,
    pub(super) focus: Focus,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    pub(super) image_base_url: String,
    pub(super) thumbnails: HashMap<String, RemoteThumbnail>,
    thumbnail_tx: mpsc::UnboundedSender<(String, RemoteThumbnail)>,
    thumbnail_rx: mpsc::UnboundedReceiver<(String, RemoteThumbnail)>,
    pub(super) active_modal: Option<ActiveModal>,
}

impl AppState {
    pub(super) fn new(
        backend: Arc<dyn TaskBackend>,
        image_base_url: String,
        limits: AttachmentLimits,
        log_buffer: LogBufferHandle,
    ) -> Self {
        let (thumbnail_tx, thumbnail_rx) = mpsc::unbounded_channel();
        Self {
            board: TaskBoard::new(backend),
            picker: ImagePicker::new(limits),
            label: Input::default(),
            toasts: Toasts::new(),
            log_buffer,
            list_state: ListState::default(),
            image_cursor: 0,
            focus: Focus::Label,
            current_tab: Tab::Tasks,
            status_message: "Ready".to_string(),
            image_base_url,
            thumbnails: HashMap::new(),
            thumbnail_tx,
            thumbnail_rx,
            active_modal: None,
        }
    }

    pub(super) fn tasks(&self) -> &[Task] {
        self.board.tasks()
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let idx = self.list_state.selected()?;
        self.tasks().get(idx)
    }

    /// Refetch the list; failed image previews get another try
    pub(super) async fn refresh_tasks(&mut self) {
        self.thumbnails
            .retain(|_, thumbnail| !matches!(thumbnail, RemoteThumbnail::Unavailable));
        self.board.refresh().await;
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            self.list_state.select(None);
        } else if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        } else if let Some(selected) = self.list_state.selected() {
            if selected >= len {
                self.list_state.select(Some(len - 1));
            }
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.tasks().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    pub(super) fn move_image_cursor(&mut self, delta: isize) {
        let len = self.picker.len();
        if len == 0 {
            self.image_cursor = 0;
            return;
        }
        let next = (self.image_cursor as isize + delta).clamp(0, (len - 1) as isize);
        self.image_cursor = next as usize;
    }

    pub(super) fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Label => Focus::Images,
            Focus::Images => Focus::Tasks,
            Focus::Tasks => Focus::Label,
        };
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Tasks => Tab::Logs,
            Tab::Logs => Tab::Tasks,
        };
    }

    /// Create a task from the label input and the pending images
    pub(super) async fn submit_task(&mut self) {
        let label = match Board::validate_label(self.label.value()) {
            Ok(label) => label.to_string(),
            Err(err) => {
                self.status_message = err.to_string();
                return;
            }
        };
        let images = self.picker.take();
        let attached = images.len();
        match self.board.create(&label, images).await {
            Ok(tasks) => {
                let count = tasks.len();
                self.label.reset();
                self.image_cursor = 0;
                self.status_message = format!("submitted \"{label}\" ({attached} image(s)), {count} task(s)");
            }
            Err(err) => self.status_message = err.to_string(),
        }
        self.sync_selection();
    }

    pub(super) async fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            self.status_message = "no task selected".to_string();
            return;
        };
        if let Err(err) = self.board.toggle(id).await {
            self.status_message = err.to_string();
        }
        self.sync_selection();
    }

    pub(super) async fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            self.status_message = "no task selected".to_string();
            return;
        };
        self.board.delete(id).await;
        self.status_message = format!("deleted task {id}");
        self.sync_selection();
    }

    /// Load files and attach them; returns `true` when all were added
    pub(super) async fn attach_files(&mut self, paths: Vec<PathBuf>) -> bool {
        if let Err(err) = self.picker.check_capacity(paths.len()) {
            self.notify(&err);
            return false;
        }

        let max_file_size = self.picker.limits().max_file_size;
        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            match LocalImage::load(path, max_file_size).await {
                Ok(image) => images.push(image),
                Err(err) => {
                    self.notify(&err);
                    return false;
                }
            }
        }

        match self.picker.add(images) {
            Ok(added) => {
                self.image_cursor = self.picker.len().saturating_sub(1);
                self.status_message = format!("attached {added} image(s)");
                true
            }
            Err(err) => {
                self.notify(&err);
                false
            }
        }
    }

    pub(super) fn notify(&mut self, err: &AttachmentError) {
        tracing::info!(error = %err, "attachment rejected");
        self.status_message = err.to_string();
        self.toasts.push(err.to_toast());
    }

    pub(super) fn dismiss_toast(&mut self) -> bool {
        self.toasts.dismiss_latest().is_some()
    }

    pub(super) fn open_add_image(&mut self) {
        if let Err(err) = self.picker.check_capacity(1) {
            self.notify(&err);
            return;
        }
        self.active_modal = Some(ActiveModal::AddImage(AddImageModal::new(self.picker.limits().hint())));
    }

    pub(super) fn request_image_removal(&mut self) {
        if let Err(err) = self.picker.request_removal(self.image_cursor) {
            self.status_message = err.to_string();
            return;
        }
        if let Some((index, image)) = self.picker.pending_removal() {
            let modal = RemoveImageModal::new(index, image.label().to_string(), image.thumbnail().cloned());
            self.active_modal = Some(ActiveModal::RemoveImage(modal));
        }
    }

    pub(super) fn confirm_image_removal(&mut self) {
        if let Some(removed) = self.picker.confirm_removal() {
            self.status_message = format!("removed {}", removed.label());
        }
        self.move_image_cursor(0);
        self.close_modal();
    }

    pub(super) fn cancel_image_removal(&mut self) {
        self.picker.cancel_removal();
        self.close_modal();
    }

    pub(super) fn close_modal(&mut self) {
        self.active_modal = None;
    }

    pub(super) fn tick(&mut self, now: Instant) {
        self.toasts.expire(now);
        while let Ok((key, thumbnail)) = self.thumbnail_rx.try_recv() {
            self.thumbnails.insert(key, thumbnail);
        }
    }

    /// Start fetching the selected task's stored image in the background.
    ///
    /// The result lands in `thumbnails` on a later [`AppState::tick`].
    pub(super) fn load_selected_thumbnail(&mut self) {
        let Some(key) = self
            .selected_task()
            .and_then(|task| task.image_key())
            .map(str::to_string)
        else {
            return;
        };
        if self.thumbnails.contains_key(&key) {
            return;
        }
        self.thumbnails.insert(key.clone(), RemoteThumbnail::Loading);

        let backend = Arc::clone(self.board.backend());
        let tx = self.thumbnail_tx.clone();
        tokio::spawn(async move {
            let entry = fetch_thumbnail(backend.as_ref(), &key).await;
            let _ = tx.send((key, entry));
        });
    }
}

async fn fetch_thumbnail(backend: &dyn TaskBackend, key: &str) -> RemoteThumbnail {
    let bytes = match backend.download_image(key).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(%key, error = %err, "failed to download stored image");
            return RemoteThumbnail::Unavailable;
        }
    };
    let decoded = tokio::task::spawn_blocking(move || {
        Thumbnail::decode(&bytes, DETAIL_THUMBNAIL_COLUMNS, DETAIL_THUMBNAIL_ROWS)
    })
    .await;
    match decoded {
        Ok(Ok(thumbnail)) => RemoteThumbnail::Ready(thumbnail),
        Ok(Err(err)) => {
            tracing::warn!(%key, error = %err, "stored image could not be decoded");
            RemoteThumbnail::Unavailable
        }
        Err(err) => {
            tracing::warn!(%key, error = %err, "thumbnail decode task failed");
            RemoteThumbnail::Unavailable
        }
    }
}
