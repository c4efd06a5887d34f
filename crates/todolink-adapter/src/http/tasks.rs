/*
[INPUT]:  Task ids, labels, completion flags and image paths
[OUTPUT]: Task rows from the remote table
[POS]:    HTTP layer - table endpoints (select, insert, update, delete)
[UPDATE]: When adding table operations or changing query parameters
*/

use crate::http::{Result, SupabaseClient, SupabaseError};
use crate::types::{NewTask, Task, TaskId, TaskPatch};
use reqwest::Method;

impl SupabaseClient {
    /// Fetch every task ordered by id ascending
    ///
    /// GET /rest/v1/{table}?select=*&order=id.asc
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self
            .rest_request(Method::GET, self.table())?
            .query(&[("select", "*"), ("order", "id.asc")]);
        self.send_json(builder).await
    }

    /// Insert a task row and return it as stored
    ///
    /// POST /rest/v1/{table}
    /// Prefer: return=representation
    pub async fn insert_task(&self, new_task: &NewTask) -> Result<Task> {
        let builder = self
            .rest_request(Method::POST, self.table())?
            .header("Prefer", "return=representation")
            .json(&[new_task]);
        let mut rows: Vec<Task> = self.send_json(builder).await?;
        if rows.is_empty() {
            return Err(SupabaseError::InvalidResponse(
                "insert returned no rows".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    /// Set the completion flag of a single task
    ///
    /// PATCH /rest/v1/{table}?id=eq.{id}
    pub async fn set_task_complete(&self, id: TaskId, complete: bool) -> Result<()> {
        let filter = format!("eq.{id}");
        let builder = self
            .rest_request(Method::PATCH, self.table())?
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=minimal")
            .json(&TaskPatch { complete });
        self.send_empty(builder).await
    }

    /// Delete a single task
    ///
    /// DELETE /rest/v1/{table}?id=eq.{id}
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let filter = format!("eq.{id}");
        let builder = self
            .rest_request(Method::DELETE, self.table())?
            .query(&[("id", filter.as_str())]);
        self.send_empty(builder).await
    }
}
