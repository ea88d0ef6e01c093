use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub camunda_task_id: String,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub form_submission_id: Option<i64>,
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    pub decision: Decision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_form_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub form_definition_id: i64,
    #[serde(default)]
    pub bpmn_xml: Option<String>,
    #[serde(default)]
    pub process_definition_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployWorkflowRequest {
    pub form_definition_id: i64,
    pub bpmn_xml: String,
    pub process_definition_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub process_instance_id: String,
    #[serde(default)]
    pub business_key: Option<String>,
    #[serde(default)]
    pub process_definition_name: Option<String>,
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub start_user_id: Option<String>,
    #[serde(default)]
    pub start_user_name: Option<String>,
    #[serde(default)]
    pub current_activity_name: Option<String>,
    #[serde(default)]
    pub suspended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessVariableUpdate {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchInstanceRequest {
    pub instance_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReassignTaskRequest {
    pub new_assignee_id: String,
}

/// Picker entry used by workflow designer and task reassignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPickerEntry {
    #[serde(deserialize_with = "crate::models::page::string_or_number")]
    pub id: String,
    pub name: String,
}
