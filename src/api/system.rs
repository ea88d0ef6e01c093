use std::collections::BTreeMap;

use serde_json::Value;

use super::Api;
use crate::error::ApiResult;
use crate::http::encode_segment;
use crate::models::{DashboardStats, ListQuery, LoginLog, OperationLog, Page};

/// Key/value system settings (branding, icon id, ...)
pub type Settings = BTreeMap<String, Value>;

// Dashboard, reports, external data
impl Api {
    pub async fn get_dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.http.get("/dashboard/stats").await
    }

    pub async fn get_report_data(&self, report_key: &str) -> ApiResult<Value> {
        self.http
            .get(&format!("/reports/{}", encode_segment(report_key)))
            .await
    }

    pub async fn get_external_suppliers(&self) -> ApiResult<Vec<Value>> {
        self.http.get("/external/suppliers").await
    }
}

// Logs
impl Api {
    pub async fn get_login_logs(&self, query: &ListQuery) -> ApiResult<Page<LoginLog>> {
        self.http.get_with_query("/admin/logs/login", query).await
    }

    pub async fn get_operation_logs(&self, query: &ListQuery) -> ApiResult<Page<OperationLog>> {
        self.http.get_with_query("/admin/logs/operation", query).await
    }
}

// Settings
impl Api {
    pub async fn get_public_settings(&self) -> ApiResult<Settings> {
        self.http.get("/public/settings").await
    }

    pub async fn get_admin_settings(&self) -> ApiResult<Settings> {
        self.http.get("/admin/settings").await
    }

    pub async fn update_settings(&self, settings: &Settings) -> ApiResult<()> {
        self.http.put("/admin/settings", settings).await
    }
}
