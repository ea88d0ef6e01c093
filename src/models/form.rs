use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldConfig {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub id: i64,
    pub name: String,
    /// Designer output, opaque to this client
    #[serde(default)]
    pub schema_json: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub filterable_fields: Vec<FormFieldConfig>,
    #[serde(default)]
    pub list_display_fields: Vec<FormFieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinitionRequest {
    pub name: String,
    pub schema_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: i64,
    #[serde(default)]
    pub form_definition_id: Option<i64>,
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub data_json: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub workflow_status: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub data_json: String,
    #[serde(default)]
    pub attachment_ids: Vec<i64>,
}

/// Another form or menu that references a form definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDependencies {
    #[serde(default)]
    pub has_dependencies: bool,
    #[serde(default)]
    pub dependencies: Vec<Value>,
}
