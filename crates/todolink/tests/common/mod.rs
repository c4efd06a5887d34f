/*
[INPUT]:  Test rows, image sizes and failure switches
[OUTPUT]: In-memory task backend and fixtures for board tests
[POS]:    Test infrastructure - shared by the todolink integration tests
[UPDATE]: When adding backend behaviours the tests need to simulate
*/

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use todolink::TaskBackend;
use todolink_adapter::{NewTask, Result, SupabaseError, Task, TaskId};

pub const TEST_KEY: &str = "anon-test-key";

/// Minimal PNG header, enough for format detection
pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn png_of_size(size: usize) -> Vec<u8> {
    let mut bytes = PNG_MAGIC.to_vec();
    bytes.resize(size.max(PNG_MAGIC.len()), 0);
    bytes
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Task table and bucket kept in memory
#[derive(Default)]
pub struct MemoryBackend {
    rows: Mutex<Vec<Task>>,
    uploads: Mutex<Vec<Upload>>,
    list_calls: Mutex<usize>,
    fail_uploads: AtomicBool,
    fail_lists: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Task>) -> Self {
        let backend = Self::default();
        *backend.rows.lock().unwrap() = rows;
        backend
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Task> {
        self.rows.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

pub fn task(id: TaskId, label: &str, complete: bool, image: Option<&str>) -> Task {
    Task {
        id,
        task: label.to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 3, 1, 9, 0, 0).unwrap(),
        complete,
        image: image.map(str::to_string),
    }
}

#[async_trait]
impl TaskBackend for MemoryBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(SupabaseError::Timeout);
        }
        let mut rows = self.rows();
        rows.sort_by_key(|task| task.id);
        Ok(rows)
    }

    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(SupabaseError::Api {
                code: 413,
                message: "Payload too large".to_string(),
            });
        }
        let key = todolink_adapter::random_object_key();
        self.uploads.lock().unwrap().push(Upload {
            key: key.clone(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(key)
    }

    async fn insert_task(&self, new_task: &NewTask) -> Result<Task> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        let row = Task {
            id,
            task: new_task.task.clone(),
            created_at: Utc::now(),
            complete: false,
            image: new_task.image.clone(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn set_task_complete(&self, id: TaskId, complete: bool) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|task| task.id == id) {
            row.complete = complete;
        }
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.rows.lock().unwrap().retain(|task| task.id != id);
        Ok(())
    }

    async fn download_image(&self, key: &str) -> Result<Vec<u8>> {
        Err(SupabaseError::Api {
            code: 404,
            message: format!("Object not found: {key}"),
        })
    }
}
