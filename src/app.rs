//! The application context: one owned value holding the session, the
//! router and the auxiliary stores, and the only place that moves the
//! session between states.
//!
//! Every API call made through [`AppContext::call`] is followed by a check
//! of the HTTP client's expired flag, so a 401 anywhere but the login call
//! ends the session even when the caller swallows the error.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::api::{Api, Settings};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{new_token_handle, HttpClient};
use crate::models::{ChangePasswordRequest, Credentials, ListQuery, Page};
use crate::notify::Notifier;
use crate::paginated::{Filters, PaginatedFetch, PaginatedOptions};
use crate::router::{
    GuardContext, GuardDecision, Navigation, NavigationError, Router, HOME_ROUTE, LOGIN_ROUTE,
    MAX_REDIRECTS,
};
use crate::session::SessionStore;
use crate::storage::{Storage, StorageError};
use crate::stores::{NotificationStore, SystemStore};

/// Page size used to fill the user/role/group pickers in one request
pub const PICKER_PAGE_SIZE: u32 = 1000;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(e) => Some(e),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub struct AppContext {
    config: ClientConfig,
    api: Api,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    session: SessionStore,
    router: Router,
    system: SystemStore,
    notifications: NotificationStore,
}

impl AppContext {
    /// Restore whatever session `storage` holds. Dynamic routes are not
    /// loaded yet; the first guarded navigation fetches them.
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        let token = new_token_handle(None);
        let session = SessionStore::restore(storage.clone(), token.clone());
        let http = HttpClient::new(&config, token, notifier.clone());
        let router = Router::new(config.ui.default_title.clone());
        let system = SystemStore::restore(storage.as_ref());

        Self {
            config,
            api: Api::new(http),
            storage,
            notifier,
            session,
            router,
            system,
            notifications: NotificationStore::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn system(&self) -> &SystemStore {
        &self.system
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn current(&self) -> Option<&Navigation> {
        self.router.current()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin(&self.config.ui.admin_role)
    }

    pub fn guard_context(&self) -> GuardContext {
        GuardContext {
            is_authenticated: self.session.is_authenticated(),
            is_admin: self.is_admin(),
            must_change_password: self.session.must_change_password(),
            dynamic_routes_loaded: self.router.dynamic_routes_loaded(),
        }
    }

    /// Sign in, load the menu tree and land on the home route. The guard
    /// diverts a user who must change their password to the profile page.
    pub async fn login(&mut self, credentials: &Credentials) -> AppResult<Navigation> {
        let auth = self.api.login(credentials).await?;
        tracing::info!("Logged in as {}", auth.user.id);

        self.session.set_auth(auth)?;
        self.fetch_and_set_menus().await?;

        let home = self.router.path_for(HOME_ROUTE)?;
        self.navigate(&home).await
    }

    /// Fetch the user's menus and rebuild the route table from them.
    /// Any failure ends the session.
    pub async fn fetch_and_set_menus(&mut self) -> AppResult<()> {
        if !self.session.is_authenticated() {
            return Ok(());
        }

        let menus = match self.api.get_my_menus().await {
            Ok(menus) => menus,
            Err(e) => {
                tracing::warn!("Failed to load menus, logging out: {}", e);
                self.logout();
                return Err(e.into());
            }
        };

        self.router.install_menus(&menus);
        self.session.set_menus(menus)?;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session.clear();
        self.router.reset();
        self.notifications.reset();
        self.api.http().take_session_expired();

        if let Err(e) = self.router.land_on(LOGIN_ROUTE) {
            tracing::error!("Failed to land on login: {}", e);
        }
        tracing::info!("Logged out");
    }

    /// Log out if a request since the last check was rejected with 401.
    /// Returns whether the session ended.
    pub fn settle_session(&mut self) -> bool {
        if !self.api.http().take_session_expired() {
            return false;
        }
        tracing::warn!("Session expired, logging out");
        self.logout();
        true
    }

    /// Run one API interaction and settle the session afterwards
    pub async fn call<T, F, Fut>(&mut self, f: F) -> ApiResult<T>
    where
        F: FnOnce(Api) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let result = f(self.api.clone()).await;
        self.settle_session();
        result
    }

    /// Paginated table state bound to a list endpoint, using the configured
    /// page size and default sort.
    pub fn paginated<T, F, Fut>(&self, list: F, filters: Filters) -> PaginatedFetch<T>
    where
        T: Send + 'static,
        F: Fn(Api, ListQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Page<T>>> + Send + 'static,
    {
        let api = self.api.clone();
        let options = PaginatedOptions {
            default_sort: self.config.ui.default_sort.clone(),
            page_size: self.config.ui.page_size,
            ..PaginatedOptions::default()
        };
        PaginatedFetch::new(move |query| list(api.clone(), query), filters, options)
    }

    /// Fetch one page of `table`, then settle the session
    pub async fn fetch_page<T: Send + 'static>(&mut self, table: &mut PaginatedFetch<T>) -> ApiResult<()> {
        let result = table.fetch_data().await;
        self.settle_session();
        result
    }

    /// Resolve `path` through the guard, following redirects, and record
    /// where navigation ended up.
    pub async fn navigate(&mut self, path: &str) -> AppResult<Navigation> {
        let mut target = path.to_string();
        let mut warnings = Vec::new();
        let mut reloaded = false;

        for _ in 0..MAX_REDIRECTS {
            let resolved = self
                .router
                .resolve(&target)
                .ok_or_else(|| NavigationError::UnknownRoute(target.clone()))?;

            match self.router.guard().evaluate(&self.guard_context(), &resolved.entry) {
                GuardDecision::Allow { title } => {
                    tracing::debug!("Navigated to '{}' ({})", target, resolved.entry.name);
                    return Ok(self.router.commit(path, &target, resolved, title, warnings));
                }
                GuardDecision::Redirect { to, warning } => {
                    if let Some(warning) = warning {
                        self.notifier.warning(&warning);
                        warnings.push(warning);
                    }
                    target = self.router.path_for(&to)?;
                }
                GuardDecision::LoadRoutesAndRetry if reloaded => {
                    return Err(NavigationError::RedirectLoop(path.to_string()).into());
                }
                GuardDecision::LoadRoutesAndRetry => {
                    reloaded = true;
                    if let Err(e) = self.fetch_and_set_menus().await {
                        tracing::warn!("Could not restore routes for '{}': {}", path, e);
                        return Ok(self.router.land_on(LOGIN_ROUTE)?);
                    }
                }
            }
        }

        Err(NavigationError::RedirectLoop(path.to_string()).into())
    }

    /// Change the password; on success the forced-change flag is dropped
    pub async fn change_password(&mut self, old_password: &str, new_password: &str) -> AppResult<()> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.call(move |api| async move { api.change_password(&request).await })
            .await?;

        self.session.mark_password_changed()?;
        Ok(())
    }

    /// Fill the user, role and group picker caches
    pub async fn load_pickers(&mut self) -> AppResult<()> {
        let api = self.api.clone();
        let query = ListQuery::page(0, PICKER_PAGE_SIZE);
        let result = futures::try_join!(
            api.get_all_users(&query),
            api.get_roles(&query),
            api.get_groups(&query),
        );
        self.settle_session();

        let (users, roles, groups) = result?;
        self.session.set_pickers(users.content, roles.content, groups.content);
        Ok(())
    }

    pub async fn refresh_public_settings(&mut self) {
        self.system
            .fetch_public_settings(&self.api, self.storage.as_ref())
            .await;
        self.settle_session();
    }

    pub async fn admin_settings(&mut self) -> Settings {
        let settings = self
            .system
            .fetch_admin_settings(&self.api, self.notifier.as_ref())
            .await;
        self.settle_session();
        settings
    }

    /// Admin settings as a base for an update; fails instead of returning an empty map
    pub async fn load_admin_settings(&mut self) -> ApiResult<Settings> {
        let result = self
            .system
            .try_fetch_admin_settings(&self.api, self.notifier.as_ref())
            .await;
        self.settle_session();
        result
    }

    pub async fn save_settings(&mut self, settings: &Settings) -> ApiResult<()> {
        let result = self
            .system
            .save_settings(&self.api, self.storage.as_ref(), self.notifier.as_ref(), settings)
            .await;
        self.settle_session();
        result
    }

    pub async fn refresh_unread_count(&mut self) -> ApiResult<u64> {
        let result = self.notifications.fetch_unread_count(&self.api).await;
        self.settle_session();
        result.map(|()| self.notifications.unread_count)
    }

    pub async fn load_notifications(&mut self, page: u32, size: u32) -> ApiResult<()> {
        let result = self.notifications.fetch_notifications(&self.api, page, size).await;
        self.settle_session();
        result
    }

    pub async fn mark_notification_read(&mut self, notification_id: i64) -> ApiResult<()> {
        let result = self.notifications.mark_as_read(&self.api, notification_id).await;
        self.settle_session();
        result
    }

    pub async fn mark_all_notifications_read(&mut self) -> ApiResult<()> {
        let result = self.notifications.mark_all_as_read(&self.api).await;
        self.settle_session();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStorage;

    fn context() -> AppContext {
        AppContext::new(
            ClientConfig::for_base_url("http://127.0.0.1:9"),
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    #[tokio::test]
    async fn anonymous_navigation_lands_on_login() {
        let mut ctx = context();
        let nav = ctx.navigate("/tasks").await.unwrap();

        assert_eq!(nav.route, LOGIN_ROUTE);
        assert_eq!(nav.requested, "/tasks");
        assert!(nav.redirected());
        assert!(nav.warnings.is_empty());
    }

    #[tokio::test]
    async fn anonymous_users_reach_public_routes() {
        let mut ctx = context();
        let nav = ctx.navigate("/does/not/exist").await.unwrap();
        assert_eq!(nav.route, "not-found");
        assert!(!nav.redirected());
    }

    #[test]
    fn logout_without_session_lands_on_login() {
        let mut ctx = context();
        ctx.logout();
        assert_eq!(ctx.current().map(|n| n.route.as_str()), Some(LOGIN_ROUTE));
        assert!(!ctx.settle_session());
    }
}
