use serde_json::Value;

use crate::api::{Api, Settings};
use crate::error::ApiResult;
use crate::models::Download;
use crate::notify::Notifier;
use crate::storage::{self, Storage, SYSTEM_SETTINGS_KEY};

pub const SYSTEM_ICON_KEY: &str = "SYSTEM_ICON_ID";

/// Branding and system-wide settings, readable before login
#[derive(Debug, Default)]
pub struct SystemStore {
    settings: Settings,
    icon: Option<Download>,
    loading: bool,
}

impl SystemStore {
    pub fn restore(storage: &dyn Storage) -> Self {
        Self {
            settings: storage::load(storage, SYSTEM_SETTINGS_KEY).unwrap_or_default(),
            icon: None,
            loading: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }

    pub fn icon(&self) -> Option<&Download> {
        self.icon.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Refresh public settings and the icon they point at. Failures are logged
    /// and leave the cached settings in place.
    pub async fn fetch_public_settings(&mut self, api: &Api, storage: &dyn Storage) {
        let settings = match api.get_public_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to fetch public system settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage::save(storage, SYSTEM_SETTINGS_KEY, &settings) {
            tracing::warn!("Failed to persist system settings: {}", e);
        }

        self.icon = None;
        let icon_id = settings.get(SYSTEM_ICON_KEY).and_then(icon_id);
        self.settings = settings;

        if let Some(id) = icon_id {
            match api.download_file(id).await {
                Ok(icon) => self.icon = Some(icon),
                Err(e) => tracing::error!("Failed to fetch system icon: {}", e),
            }
        }
    }

    /// Full settings for the admin screen; empty on failure
    pub async fn fetch_admin_settings(&mut self, api: &Api, notifier: &dyn Notifier) -> Settings {
        self.try_fetch_admin_settings(api, notifier)
            .await
            .unwrap_or_default()
    }

    /// Same as [`Self::fetch_admin_settings`] but hands the failure back, for
    /// callers that must not go on with an empty map
    pub async fn try_fetch_admin_settings(&mut self, api: &Api, notifier: &dyn Notifier) -> ApiResult<Settings> {
        self.loading = true;
        let result = api.get_admin_settings().await;
        self.loading = false;

        result.inspect_err(|e| {
            tracing::debug!("Admin settings unavailable: {}", e);
            notifier.error("Failed to load system settings");
        })
    }

    pub async fn save_settings(
        &mut self,
        api: &Api,
        storage: &dyn Storage,
        notifier: &dyn Notifier,
        settings: &Settings,
    ) -> ApiResult<()> {
        self.loading = true;
        let result = api.update_settings(settings).await;
        if result.is_ok() {
            self.fetch_public_settings(api, storage).await;
            notifier.success("System settings updated. Some changes may need a restart to take effect.");
        }
        self.loading = false;
        result
    }
}

fn icon_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
