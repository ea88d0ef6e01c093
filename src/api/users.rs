use serde_json::Value;

use super::Api;
use crate::error::ApiResult;
use crate::http::encode_segment;
use crate::models::{
    ChangePasswordRequest, Department, ListQuery, Page, Role, User, UserGroup, UserPickerEntry,
    UserProfile,
};

// Current user
impl Api {
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<Value> {
        self.http.post("/users/me/change-password", request).await
    }

    pub async fn get_my_profile(&self) -> ApiResult<UserProfile> {
        self.http.get("/users/me/profile").await
    }

    pub async fn update_my_profile(&self, profile: &UserProfile) -> ApiResult<UserProfile> {
        self.http.put("/users/me/profile", profile).await
    }

    pub async fn get_organization_tree(&self) -> ApiResult<Vec<Value>> {
        self.http.get("/admin/organization-tree").await
    }

    pub async fn search_users_for_picker(&self, keyword: &str) -> ApiResult<Vec<UserPickerEntry>> {
        let query = ListQuery::new().with("keyword", keyword);
        self.http.get_with_query("/users/search-for-picker", &query).await
    }
}

// Departments
impl Api {
    pub async fn get_department_tree(&self) -> ApiResult<Vec<Department>> {
        self.http.get("/admin/departments/tree").await
    }

    pub async fn create_department(&self, department: &Department) -> ApiResult<Department> {
        self.http.post("/admin/departments", department).await
    }

    pub async fn update_department(&self, id: i64, department: &Department) -> ApiResult<Department> {
        self.http.put(&format!("/admin/departments/{id}"), department).await
    }

    pub async fn delete_department(&self, id: i64) -> ApiResult<()> {
        self.http.delete(&format!("/admin/departments/{id}")).await
    }
}

// Admin: users
impl Api {
    pub async fn get_all_users(&self, query: &ListQuery) -> ApiResult<Page<User>> {
        self.http.get_with_query("/admin/users", query).await
    }

    pub async fn create_user(&self, user: &Value) -> ApiResult<User> {
        self.http.post("/admin/users", user).await
    }

    pub async fn update_user(&self, id: &str, user: &Value) -> ApiResult<User> {
        self.http.put(&format!("/admin/users/{}", encode_segment(id)), user).await
    }

    /// The engine never hard-deletes users; DELETE disables the account
    pub async fn disable_user(&self, id: &str) -> ApiResult<()> {
        self.http.delete(&format!("/admin/users/{}", encode_segment(id))).await
    }

    pub async fn enable_user(&self, id: &str) -> ApiResult<()> {
        self.http
            .post_empty(&format!("/admin/users/{}/enable", encode_segment(id)))
            .await
    }

    pub async fn reset_password(&self, id: &str) -> ApiResult<Value> {
        self.http
            .post_empty(&format!("/admin/users/{}/reset-password", encode_segment(id)))
            .await
    }
}

// Admin: roles and groups
impl Api {
    pub async fn get_roles(&self, query: &ListQuery) -> ApiResult<Page<Role>> {
        self.http.get_with_query("/admin/roles", query).await
    }

    pub async fn create_role(&self, role: &Value) -> ApiResult<Role> {
        self.http.post("/admin/roles", role).await
    }

    pub async fn update_role(&self, id: i64, role: &Value) -> ApiResult<Role> {
        self.http.put(&format!("/admin/roles/{id}"), role).await
    }

    pub async fn delete_role(&self, id: i64) -> ApiResult<()> {
        self.http.delete(&format!("/admin/roles/{id}")).await
    }

    pub async fn get_groups(&self, query: &ListQuery) -> ApiResult<Page<UserGroup>> {
        self.http.get_with_query("/admin/groups", query).await
    }

    pub async fn create_group(&self, group: &Value) -> ApiResult<UserGroup> {
        self.http.post("/admin/groups", group).await
    }

    pub async fn update_group(&self, id: i64, group: &Value) -> ApiResult<UserGroup> {
        self.http.put(&format!("/admin/groups/{id}"), group).await
    }

    pub async fn delete_group(&self, id: i64) -> ApiResult<()> {
        self.http.delete(&format!("/admin/groups/{id}")).await
    }
}
