use serde_json::Value;

use super::Api;
use crate::error::ApiResult;
use crate::http::encode_segment;
use crate::models::{
    DeployWorkflowRequest, FormSubmission, ListQuery, Page, UserGroup, UserPickerEntry,
    WorkflowTemplate,
};

impl Api {
    pub async fn deploy_workflow(&self, request: &DeployWorkflowRequest) -> ApiResult<Value> {
        self.http.post("/workflows/deploy", request).await
    }

    pub async fn get_workflow_template(&self, form_id: i64) -> ApiResult<WorkflowTemplate> {
        let query = ListQuery::new().with("formId", form_id);
        self.http.get_with_query("/workflows/templates", &query).await
    }

    pub async fn get_workflow_history(&self, submission_id: i64) -> ApiResult<Vec<Value>> {
        self.http
            .get(&format!("/workflows/history/{submission_id}"))
            .await
    }

    pub async fn update_workflow_template(&self, form_id: i64, template: &WorkflowTemplate) -> ApiResult<WorkflowTemplate> {
        self.http
            .put(&format!("/workflows/templates/{form_id}"), template)
            .await
    }

    pub async fn get_groups_for_workflow(&self) -> ApiResult<Vec<UserGroup>> {
        self.http.get("/workflows/groups").await
    }

    pub async fn get_users_for_picker(&self, query: &ListQuery) -> ApiResult<Page<UserPickerEntry>> {
        self.http.get_with_query("/workflows/users", query).await
    }

    pub async fn get_my_submissions(&self, query: &ListQuery) -> ApiResult<Page<FormSubmission>> {
        self.http.get_with_query("/workflows/my-submissions", query).await
    }

    pub async fn get_workflow_diagram(&self, submission_id: i64) -> ApiResult<Value> {
        self.http
            .get(&format!("/workflows/submission/{submission_id}/diagram"))
            .await
    }

    pub async fn get_available_beans(&self, query: &ListQuery) -> ApiResult<Vec<Value>> {
        self.http.get_with_query("/workflows/designer/beans", query).await
    }

    pub async fn get_workflow_diagram_by_instance_id(&self, instance_id: &str) -> ApiResult<Value> {
        self.http
            .get(&format!("/workflows/instance/{}/diagram", encode_segment(instance_id)))
            .await
    }
}
