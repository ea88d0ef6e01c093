use super::Api;
use crate::error::ApiResult;
use crate::models::{ListQuery, Notification, Page, UnreadCount};

impl Api {
    pub async fn get_notifications(&self, query: &ListQuery) -> ApiResult<Page<Notification>> {
        self.http.get_with_query("/notifications", query).await
    }

    pub async fn get_unread_notification_count(&self) -> ApiResult<UnreadCount> {
        self.http.get("/notifications/unread-count").await
    }

    pub async fn mark_all_notifications_as_read(&self) -> ApiResult<()> {
        self.http.post_empty("/notifications/mark-all-as-read").await
    }

    pub async fn mark_notifications_as_read(&self, ids: &[i64]) -> ApiResult<()> {
        self.http.post("/notifications/mark-as-read", ids).await
    }
}
