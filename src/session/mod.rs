//! Session/identity state: token, current user, authorized menu tree.
//!
//! State transitions are driven by [`AppContext`](crate::app::AppContext);
//! this type only owns the data, keeps it in sync with persisted storage,
//! and answers the derived questions (authenticated? admin? must change
//! password?).

use std::sync::Arc;

use serde::Serialize;

use crate::http::TokenHandle;
use crate::models::{AuthResponse, CurrentUser, MenuNode, Role, User, UserGroup};
use crate::storage::{self, Storage, StorageError, MENUS_KEY, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Anonymous,
    Authenticated,
    PasswordChangeRequired,
}

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    token: TokenHandle,
    user: Option<CurrentUser>,
    menus: Vec<MenuNode>,
    cached_users: Vec<User>,
    cached_roles: Vec<Role>,
    cached_groups: Vec<UserGroup>,
}

impl SessionStore {
    /// Rebuild the session persisted by a previous run
    pub fn restore(storage: Arc<dyn Storage>, token: TokenHandle) -> Self {
        let saved_token: Option<String> = storage::load(storage.as_ref(), TOKEN_KEY);
        let user: Option<CurrentUser> = storage::load(storage.as_ref(), USER_KEY);
        let menus: Vec<MenuNode> = storage::load(storage.as_ref(), MENUS_KEY).unwrap_or_default();

        if let Ok(mut slot) = token.write() {
            *slot = saved_token;
        }

        Self {
            storage,
            token,
            user,
            menus,
            cached_users: Vec::new(),
            cached_roles: Vec::new(),
            cached_groups: Vec::new(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn menus(&self) -> &[MenuNode] {
        &self.menus
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user.is_some()
    }

    pub fn is_admin(&self, admin_role: &str) -> bool {
        self.user.as_ref().map(|u| u.has_role(admin_role)).unwrap_or(false)
    }

    pub fn must_change_password(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.password_change_required)
            .unwrap_or(false)
    }

    pub fn state(&self) -> SessionState {
        if !self.is_authenticated() {
            SessionState::Anonymous
        } else if self.must_change_password() {
            SessionState::PasswordChangeRequired
        } else {
            SessionState::Authenticated
        }
    }

    pub fn set_auth(&mut self, auth: AuthResponse) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(auth.token.clone());
        }
        self.user = Some(auth.user);

        storage::save(self.storage.as_ref(), TOKEN_KEY, &auth.token)?;
        storage::save(self.storage.as_ref(), USER_KEY, &self.user)
    }

    pub fn set_menus(&mut self, menus: Vec<MenuNode>) -> Result<(), StorageError> {
        self.menus = menus;
        storage::save(self.storage.as_ref(), MENUS_KEY, &self.menus)
    }

    /// The forced-change flag is cleared locally once the server accepted a new password
    pub fn mark_password_changed(&mut self) -> Result<(), StorageError> {
        if let Some(user) = self.user.as_mut() {
            user.password_change_required = false;
        }
        storage::save(self.storage.as_ref(), USER_KEY, &self.user)
    }

    pub fn cached_users(&self) -> &[User] {
        &self.cached_users
    }

    pub fn cached_roles(&self) -> &[Role] {
        &self.cached_roles
    }

    pub fn cached_groups(&self) -> &[UserGroup] {
        &self.cached_groups
    }

    pub fn set_pickers(&mut self, users: Vec<User>, roles: Vec<Role>, groups: Vec<UserGroup>) {
        self.cached_users = users;
        self.cached_roles = roles;
        self.cached_groups = groups;
    }

    /// Drop everything, in memory and on disk
    pub fn clear(&mut self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        self.user = None;
        self.menus.clear();
        self.cached_users.clear();
        self.cached_roles.clear();
        self.cached_groups.clear();

        if let Err(e) = self.storage.clear() {
            tracing::error!("Failed to clear persisted session: {}", e);
        }
    }
}
