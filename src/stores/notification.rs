use crate::api::Api;
use crate::error::ApiResult;
use crate::models::{ListQuery, Notification};
use crate::paginated::Pagination;

/// In-app notifications and the unread badge
#[derive(Debug)]
pub struct NotificationStore {
    pub unread_count: u64,
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub pagination: Pagination,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self {
            unread_count: 0,
            notifications: Vec::new(),
            loading: false,
            pagination: Pagination {
                current: 1,
                page_size: 10,
                total: 0,
            },
        }
    }
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch_unread_count(&mut self, api: &Api) -> ApiResult<()> {
        match api.get_unread_notification_count().await {
            Ok(unread) => {
                self.unread_count = unread.count;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch unread notification count: {}", e);
                Err(e)
            }
        }
    }

    /// `page` is 1-based
    pub async fn fetch_notifications(&mut self, api: &Api, page: u32, size: u32) -> ApiResult<()> {
        let page = page.max(1);
        self.loading = true;
        let query = ListQuery::page(page - 1, size);
        let result = api.get_notifications(&query).await;
        self.loading = false;

        let result = result.map_err(|e| {
            tracing::error!("Failed to fetch notifications: {}", e);
            e
        })?;
        self.notifications = result.content;
        self.pagination.current = page;
        self.pagination.page_size = size;
        self.pagination.total = result.total_elements;
        Ok(())
    }

    pub async fn mark_all_as_read(&mut self, api: &Api) -> ApiResult<()> {
        if let Err(e) = api.mark_all_notifications_as_read().await {
            tracing::error!("Failed to mark all notifications as read: {}", e);
            return Err(e);
        }
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
        Ok(())
    }

    pub async fn mark_as_read(&mut self, api: &Api, notification_id: i64) -> ApiResult<()> {
        if let Err(e) = api.mark_notifications_as_read(&[notification_id]).await {
            tracing::error!("Failed to mark notification {} as read: {}", notification_id, e);
            return Err(e);
        }
        self.apply_read(notification_id);
        Ok(())
    }

    fn apply_read(&mut self, notification_id: i64) {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        else {
            return;
        };

        if !notification.is_read {
            notification.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: i64, is_read: bool) -> Notification {
        Notification {
            id,
            title: format!("n{id}"),
            content: None,
            kind: None,
            link: None,
            is_read,
            created_at: None,
        }
    }

    #[test]
    fn apply_read_decrements_only_for_unread_items() {
        let mut store = NotificationStore::new();
        store.notifications = vec![notification(1, false), notification(2, true)];
        store.unread_count = 1;

        store.apply_read(2);
        assert_eq!(store.unread_count, 1);

        store.apply_read(1);
        assert_eq!(store.unread_count, 0);
        assert!(store.notifications[0].is_read);

        store.notifications.push(notification(3, false));
        store.apply_read(3);
        assert_eq!(store.unread_count, 0);
    }
}
