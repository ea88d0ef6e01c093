use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: CurrentUser,
}

/// The signed-in user as returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(deserialize_with = "crate::models::page::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password_change_required: bool,
}

impl CurrentUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_user_accepts_numeric_id() {
        let user: CurrentUser = serde_json::from_value(json!({
            "id": 1,
            "name": "Ada",
            "role": "ADMIN",
            "passwordChangeRequired": true
        }))
        .unwrap();

        assert_eq!(user.id, "1");
        assert!(user.has_role("ADMIN"));
        assert!(user.password_change_required);
    }

    #[test]
    fn credentials_serialize_as_camel_case() {
        let body = serde_json::to_value(Credentials {
            user_id: "ada".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"userId": "ada", "password": "secret"}));
    }
}
