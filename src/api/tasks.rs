use serde_json::Value;

use super::Api;
use crate::error::ApiResult;
use crate::http::encode_segment;
use crate::models::{CompleteTaskRequest, ListQuery, Page, Task};

impl Api {
    pub async fn get_pending_tasks(&self, query: &ListQuery) -> ApiResult<Page<Task>> {
        self.http.get_with_query("/tasks/pending", query).await
    }

    pub async fn get_task_by_id(&self, task_id: &str) -> ApiResult<Task> {
        self.http.get(&format!("/tasks/{}", encode_segment(task_id))).await
    }

    pub async fn complete_task(&self, task_id: &str, request: &CompleteTaskRequest) -> ApiResult<Value> {
        self.http
            .post(&format!("/tasks/{}/complete", encode_segment(task_id)), request)
            .await
    }

    pub async fn get_completed_tasks(&self, query: &ListQuery) -> ApiResult<Page<Value>> {
        self.http.get_with_query("/tasks/completed", query).await
    }
}
