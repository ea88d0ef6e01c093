#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use workflow_admin::config::ClientConfig;
use workflow_admin::models::Credentials;
use workflow_admin::notify::{Level, RecordingNotifier};
use workflow_admin::storage::{MemoryStorage, Storage};
use workflow_admin::AppContext;

/// A mock engine plus an application context pointed at it
pub struct TestConsole {
    pub server: MockServer,
    pub notifier: RecordingNotifier,
    pub storage: Arc<MemoryStorage>,
    pub ctx: AppContext,
}

impl TestConsole {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let notifier = RecordingNotifier::new();
        let storage = Arc::new(MemoryStorage::new());
        let ctx = context_for(&server, storage.clone(), notifier.clone());

        Self {
            server,
            notifier,
            storage,
            ctx,
        }
    }

    /// A second context over the same storage, as after a restart
    pub fn reopen(&self) -> AppContext {
        context_for(&self.server, self.storage.clone(), self.notifier.clone())
    }

    pub fn errors(&self) -> usize {
        self.notifier.count(Level::Error)
    }

    pub fn warnings(&self) -> usize {
        self.notifier.count(Level::Warning)
    }

    /// Mount a successful login and menu tree, then log in as `user`
    pub async fn login_as(&mut self, user: Value) -> Result<()> {
        mount_login(&self.server, user).await;
        mount_menus(&self.server, sample_menus()).await;
        self.ctx.login(&credentials()).await?;
        Ok(())
    }
}

fn context_for(server: &MockServer, storage: Arc<MemoryStorage>, notifier: RecordingNotifier) -> AppContext {
    let storage: Arc<dyn Storage> = storage;
    AppContext::new(
        ClientConfig::for_base_url(server.uri()),
        storage,
        Arc::new(notifier),
    )
}

pub fn credentials() -> Credentials {
    Credentials {
        user_id: "ada".to_string(),
        password: "secret".to_string(),
    }
}

pub fn user(password_change_required: bool) -> Value {
    json!({
        "id": 1,
        "name": "Ada",
        "role": "USER",
        "passwordChangeRequired": password_change_required
    })
}

pub fn admin() -> Value {
    json!({
        "id": "admin",
        "name": "Root",
        "role": "ADMIN",
        "passwordChangeRequired": false
    })
}

pub fn sample_menus() -> Value {
    json!([
        {
            "id": 1,
            "name": "Warehouse",
            "type": "DIRECTORY",
            "children": [
                { "id": 2, "name": "Inbound", "type": "FORM_ENTRY", "path": "/wms/inbound", "formDefinitionId": 7 },
                { "id": 3, "name": "Stock", "type": "DATA_LIST", "path": "/wms/stock", "formDefinitionId": 8 }
            ]
        },
        { "id": 4, "name": "Monthly", "type": "REPORT", "path": "/reports/monthly" }
    ])
}

pub async fn mount_login(server: &MockServer, user: Value) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "t1",
            "user": user
        })))
        .mount(server)
        .await;
}

pub async fn mount_menus(server: &MockServer, menus: Value) {
    Mock::given(method("GET"))
        .and(path("/menus/my-menus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menus))
        .mount(server)
        .await;
}

pub fn page(content: Value, total: u64) -> Value {
    json!({ "content": content, "totalElements": total })
}
