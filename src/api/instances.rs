use serde_json::{json, Value};

use super::Api;
use crate::error::ApiResult;
use crate::http::encode_segment;
use crate::models::{
    BatchInstanceRequest, ListQuery, Page, ProcessInstance, ProcessVariableUpdate,
    ReassignTaskRequest,
};

impl Api {
    pub async fn get_process_instances(&self, query: &ListQuery) -> ApiResult<Page<ProcessInstance>> {
        self.http.get_with_query("/admin/instances", query).await
    }

    pub async fn terminate_instance(&self, instance_id: &str, reason: &str) -> ApiResult<()> {
        let query = ListQuery::new().with("reason", reason);
        self.http
            .delete_with_query(&format!("/admin/instances/{}", encode_segment(instance_id)), &query)
            .await
    }

    pub async fn suspend_instance(&self, instance_id: &str) -> ApiResult<()> {
        self.http
            .post_empty(&format!("/admin/instances/{}/suspend", encode_segment(instance_id)))
            .await
    }

    pub async fn activate_instance(&self, instance_id: &str) -> ApiResult<()> {
        self.http
            .post_empty(&format!("/admin/instances/{}/activate", encode_segment(instance_id)))
            .await
    }

    pub async fn reassign_task(&self, task_id: &str, new_assignee_id: &str) -> ApiResult<()> {
        let body = ReassignTaskRequest {
            new_assignee_id: new_assignee_id.to_string(),
        };
        self.http
            .post(&format!("/admin/tasks/{}/reassign", encode_segment(task_id)), &body)
            .await
    }

    pub async fn get_process_variables(&self, instance_id: &str) -> ApiResult<Value> {
        self.http
            .get(&format!("/admin/instances/{}/variables", encode_segment(instance_id)))
            .await
    }

    pub async fn update_process_variable(&self, instance_id: &str, update: &ProcessVariableUpdate) -> ApiResult<()> {
        self.http
            .put(&format!("/admin/instances/{}/variables", encode_segment(instance_id)), update)
            .await
    }

    pub async fn batch_suspend_instances(&self, instance_ids: &[String]) -> ApiResult<Value> {
        let body = json!({ "instanceIds": instance_ids });
        self.http.post("/admin/instances/batch-suspend", &body).await
    }

    pub async fn batch_activate_instances(&self, instance_ids: &[String]) -> ApiResult<Value> {
        let body = json!({ "instanceIds": instance_ids });
        self.http.post("/admin/instances/batch-activate", &body).await
    }

    pub async fn batch_terminate_instances(&self, instance_ids: &[String], reason: &str) -> ApiResult<Value> {
        let body = BatchInstanceRequest {
            instance_ids: instance_ids.to_vec(),
            reason: Some(reason.to_string()),
        };
        self.http.post("/admin/instances/batch-terminate", &body).await
    }

    pub async fn get_process_definition_xml(&self, process_definition_id: &str) -> ApiResult<Value> {
        self.http
            .get(&format!(
                "/admin/process-definitions/{}/xml",
                encode_segment(process_definition_id)
            ))
            .await
    }

    pub async fn get_activity_instances(&self, instance_id: &str) -> ApiResult<Value> {
        self.http
            .get(&format!("/admin/instances/{}/activity-instances", encode_segment(instance_id)))
            .await
    }

    pub async fn get_incidents(&self, instance_id: &str) -> ApiResult<Vec<Value>> {
        self.http
            .get(&format!("/admin/instances/{}/incidents", encode_segment(instance_id)))
            .await
    }

    pub async fn retry_job(&self, job_id: &str) -> ApiResult<()> {
        self.http
            .post_empty(&format!("/admin/jobs/{}/retry", encode_segment(job_id)))
            .await
    }
}
