/*
[INPUT]:  Backend client, task labels, pending images, completion toggles
[OUTPUT]: The current task list, refetched after every mutation
[POS]:    Task list layer - create/read/update/delete against the remote table
[UPDATE]: When adding task operations or changing the refresh contract
*/

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use todolink_adapter::{NewTask, SupabaseClient, Task, TaskId};

use crate::attachments::PendingImage;

/// Remote operations the board depends on
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn list_tasks(&self) -> todolink_adapter::Result<Vec<Task>>;

    /// Upload image bytes under a fresh key; returns the key to store on the row
    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> todolink_adapter::Result<String>;

    async fn insert_task(&self, new_task: &NewTask) -> todolink_adapter::Result<Task>;

    async fn set_task_complete(&self, id: TaskId, complete: bool) -> todolink_adapter::Result<()>;

    async fn delete_task(&self, id: TaskId) -> todolink_adapter::Result<()>;

    /// Bytes of a stored image, for previews
    async fn download_image(&self, key: &str) -> todolink_adapter::Result<Vec<u8>>;
}

#[async_trait]
impl TaskBackend for SupabaseClient {
    async fn list_tasks(&self) -> todolink_adapter::Result<Vec<Task>> {
        SupabaseClient::list_tasks(self).await
    }

    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> todolink_adapter::Result<String> {
        let stored = SupabaseClient::upload_image(self, bytes, content_type).await?;
        Ok(stored.path)
    }

    async fn insert_task(&self, new_task: &NewTask) -> todolink_adapter::Result<Task> {
        SupabaseClient::insert_task(self, new_task).await
    }

    async fn set_task_complete(&self, id: TaskId, complete: bool) -> todolink_adapter::Result<()> {
        SupabaseClient::set_task_complete(self, id, complete).await
    }

    async fn delete_task(&self, id: TaskId) -> todolink_adapter::Result<()> {
        SupabaseClient::delete_task(self, id).await
    }

    async fn download_image(&self, key: &str) -> todolink_adapter::Result<Vec<u8>> {
        self.download_public_object(key).await
    }
}

#[async_trait]
impl<T: TaskBackend + ?Sized> TaskBackend for Arc<T> {
    async fn list_tasks(&self) -> todolink_adapter::Result<Vec<Task>> {
        (**self).list_tasks().await
    }

    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> todolink_adapter::Result<String> {
        (**self).upload_image(bytes, content_type).await
    }

    async fn insert_task(&self, new_task: &NewTask) -> todolink_adapter::Result<Task> {
        (**self).insert_task(new_task).await
    }

    async fn set_task_complete(&self, id: TaskId, complete: bool) -> todolink_adapter::Result<()> {
        (**self).set_task_complete(id, complete).await
    }

    async fn delete_task(&self, id: TaskId) -> todolink_adapter::Result<()> {
        (**self).delete_task(id).await
    }

    async fn download_image(&self, key: &str) -> todolink_adapter::Result<Vec<u8>> {
        (**self).download_image(key).await
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("task label must not be empty")]
    EmptyLabel,

    #[error("no task with id {0}")]
    UnknownTask(TaskId),
}

/// In-memory view of the remote task table.
///
/// Every mutation is awaited, then the list is refetched before the call
/// returns, so the list always reflects the latest full read. Remote
/// failures are logged and swallowed.
pub struct TaskBoard<B> {
    backend: B,
    tasks: Vec<Task>,
}

impl<B: TaskBackend> TaskBoard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Trimmed label, or an error for blank input
    pub fn validate_label(label: &str) -> Result<&str, BoardError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            Err(BoardError::EmptyLabel)
        } else {
            Ok(trimmed)
        }
    }

    /// Refetch every task; on failure the current list is kept
    pub async fn refresh(&mut self) -> &[Task] {
        match self.backend.list_tasks().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
            }
            Err(err) => tracing::warn!(error = %err, "failed to load tasks"),
        }
        &self.tasks
    }

    /// Create a task, attaching the first pending image if there is one
    pub async fn create(&mut self, label: &str, images: Vec<PendingImage>) -> Result<&[Task], BoardError> {
        let label = Self::validate_label(label)?.to_string();

        let mut images = images.into_iter();
        let image = match images.next() {
            Some(first) => self.store_image(first).await,
            None => None,
        };
        let skipped = images.count();
        if skipped > 0 {
            tracing::debug!(skipped, "only the first image is stored on a task");
        }

        match self.backend.insert_task(&NewTask::new(label, image)).await {
            Ok(task) => tracing::info!(task_id = task.id, image = ?task.image, "task created"),
            Err(err) => tracing::warn!(error = %err, "failed to create task"),
        }
        Ok(self.refresh().await)
    }

    pub async fn set_complete(&mut self, id: TaskId, complete: bool) -> &[Task] {
        match self.backend.set_task_complete(id, complete).await {
            Ok(()) => tracing::info!(task_id = id, complete, "task updated"),
            Err(err) => tracing::warn!(task_id = id, error = %err, "failed to update task"),
        }
        self.refresh().await
    }

    /// Flip the completion flag of a task in the current list
    pub async fn toggle(&mut self, id: TaskId) -> Result<&[Task], BoardError> {
        let complete = self.task(id).ok_or(BoardError::UnknownTask(id))?.complete;
        Ok(self.set_complete(id, !complete).await)
    }

    pub async fn delete(&mut self, id: TaskId) -> &[Task] {
        match self.backend.delete_task(id).await {
            Ok(()) => tracing::info!(task_id = id, "task deleted"),
            Err(err) => tracing::warn!(task_id = id, error = %err, "failed to delete task"),
        }
        self.refresh().await
    }

    async fn store_image(&self, image: PendingImage) -> Option<String> {
        match image {
            PendingImage::Remote { key } => Some(key),
            PendingImage::Local(local) => {
                let name = local.name().to_string();
                let content_type = local.content_type();
                match self.backend.upload_image(local.into_bytes(), content_type).await {
                    Ok(key) => {
                        tracing::info!(%name, %key, "image uploaded");
                        Some(key)
                    }
                    Err(err) => {
                        tracing::warn!(%name, error = %err, "image upload failed, creating task without image");
                        None
                    }
                }
            }
        }
    }
}
