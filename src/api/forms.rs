use serde_json::Value;

use super::Api;
use crate::error::ApiResult;
use crate::models::{
    FormDefinition, FormDefinitionRequest, FormDependencies, FormSubmission, ListQuery, Page,
    SubmissionRequest,
};

impl Api {
    pub async fn get_forms(&self, query: &ListQuery) -> ApiResult<Page<FormDefinition>> {
        self.http.get_with_query("/forms", query).await
    }

    pub async fn get_form_by_id(&self, id: i64) -> ApiResult<FormDefinition> {
        self.http.get(&format!("/forms/{id}")).await
    }

    pub async fn create_form(&self, form: &FormDefinitionRequest) -> ApiResult<FormDefinition> {
        self.http.post("/forms", form).await
    }

    pub async fn update_form(&self, id: i64, form: &FormDefinitionRequest) -> ApiResult<FormDefinition> {
        self.http.put(&format!("/forms/{id}"), form).await
    }

    pub async fn delete_form(&self, id: i64, cascade: bool) -> ApiResult<()> {
        let query = ListQuery::new().with("cascade", cascade);
        self.http.delete_with_query(&format!("/forms/{id}"), &query).await
    }

    pub async fn get_form_dependencies(&self, id: i64) -> ApiResult<FormDependencies> {
        self.http.get(&format!("/forms/{id}/dependencies")).await
    }

    pub async fn get_submissions(&self, form_id: i64, query: &ListQuery) -> ApiResult<Page<FormSubmission>> {
        self.http
            .get_with_query(&format!("/forms/{form_id}/submissions"), query)
            .await
    }

    pub async fn get_submission_by_id(&self, submission_id: i64) -> ApiResult<FormSubmission> {
        self.http.get(&format!("/forms/submissions/{submission_id}")).await
    }

    pub async fn submit_form(&self, form_id: i64, submission: &SubmissionRequest) -> ApiResult<FormSubmission> {
        self.http
            .post(&format!("/forms/{form_id}/submissions"), submission)
            .await
    }

    pub async fn update_submission(&self, submission_id: i64, submission: &SubmissionRequest) -> ApiResult<FormSubmission> {
        self.http
            .put(&format!("/forms/submissions/{submission_id}"), submission)
            .await
    }

    pub async fn delete_submission(&self, submission_id: i64) -> ApiResult<()> {
        self.http.delete(&format!("/forms/submissions/{submission_id}")).await
    }

    /// Generic table source used by data-list pages; `url` is server-relative
    pub async fn fetch_table_data(&self, url: &str, query: &ListQuery) -> ApiResult<Page<Value>> {
        self.http.get_with_query(url, query).await
    }

    pub async fn fetch_tree_data(&self, source: &str) -> ApiResult<Value> {
        let query = ListQuery::new().with("source", source);
        self.http.get_with_query("/admin/tree-data-source", &query).await
    }

    pub async fn import_from_word(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<Value> {
        self.http.upload("/forms/import-word", filename, bytes).await
    }

    pub async fn create_draft(&self, form_id: i64, draft: &SubmissionRequest) -> ApiResult<FormSubmission> {
        self.http
            .post(&format!("/forms/{form_id}/submissions/draft"), draft)
            .await
    }

    pub async fn update_my_draft(&self, submission_id: i64, draft: &SubmissionRequest) -> ApiResult<FormSubmission> {
        self.http
            .put(&format!("/forms/my-submissions/{submission_id}"), draft)
            .await
    }

    pub async fn submit_draft(&self, submission_id: i64, submission: &SubmissionRequest) -> ApiResult<FormSubmission> {
        self.http
            .put(&format!("/forms/submissions/{submission_id}/submit"), submission)
            .await
    }

    pub async fn delete_my_draft(&self, submission_id: i64) -> ApiResult<()> {
        self.http
            .delete(&format!("/forms/my-submissions/{submission_id}"))
            .await
    }
}
