pub mod guard;
pub mod route;
pub mod table;

use serde::Serialize;
use thiserror::Error;

use crate::models::MenuNode;

pub use guard::{GuardContext, GuardDecision, NavigationGuard};
pub use route::{RouteEntry, RouteMeta, RouteParams, ViewKind};
pub use table::{
    route_name_for, ResolvedRoute, RouteTable, ViewRegistry, HOME_ROUTE, LOGIN_ROUTE,
    NOT_FOUND_ROUTE, PROFILE_ROUTE,
};

/// Redirect chains longer than this are treated as a loop
pub const MAX_REDIRECTS: usize = 8;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Redirect loop while navigating to '{0}'")]
    RedirectLoop(String),

    #[error("Unknown route name: {0}")]
    UnknownRoute(String),
}

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub requested: String,
    pub path: String,
    pub route: String,
    pub view: ViewKind,
    pub params: RouteParams,
    pub form_id: Option<i64>,
    pub title: String,
    pub warnings: Vec<String>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.path
    }
}

/// Owns the current route table and the landing state
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    registry: ViewRegistry,
    guard: NavigationGuard,
    dynamic_loaded: bool,
    current: Option<Navigation>,
}

impl Router {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self::with_registry(default_title, ViewRegistry::default())
    }

    pub fn with_registry(default_title: impl Into<String>, registry: ViewRegistry) -> Self {
        Self {
            table: RouteTable::static_table(),
            registry,
            guard: NavigationGuard::standard(default_title),
            dynamic_loaded: false,
            current: None,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn dynamic_routes_loaded(&self) -> bool {
        self.dynamic_loaded
    }

    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Rebuild the table from the static routes and `menus`
    pub fn install_menus(&mut self, menus: &[MenuNode]) {
        self.table = RouteTable::with_menus(menus, &self.registry);
        self.dynamic_loaded = true;
        tracing::info!(
            "Installed {} dynamic routes",
            self.table.dynamic_routes().count()
        );
    }

    /// Back to the static table
    pub fn reset(&mut self) {
        self.table = RouteTable::static_table();
        self.dynamic_loaded = false;
        self.current = None;
    }

    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        self.table.resolve(path)
    }

    pub fn path_for(&self, name: &str) -> Result<String, NavigationError> {
        self.table
            .get(name)
            .and_then(|r| r.build_path(&RouteParams::new()))
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))
    }

    /// Record an allowed navigation as the current location
    pub fn commit(
        &mut self,
        requested: &str,
        path: &str,
        resolved: ResolvedRoute,
        title: String,
        warnings: Vec<String>,
    ) -> Navigation {
        let navigation = Navigation {
            requested: requested.to_string(),
            path: path.to_string(),
            route: resolved.entry.name.clone(),
            view: resolved.entry.view,
            params: resolved.params,
            form_id: resolved.entry.meta.form_id,
            title,
            warnings,
        };
        self.current = Some(navigation.clone());
        navigation
    }

    /// Land on a named static route without consulting the guard
    pub fn land_on(&mut self, name: &str) -> Result<Navigation, NavigationError> {
        let path = self.path_for(name)?;
        let resolved = self
            .resolve(&path)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;
        let title = resolved
            .entry
            .meta
            .title
            .clone()
            .unwrap_or_default();
        Ok(self.commit(&path, &path, resolved, title, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuType;

    #[test]
    fn install_and_reset_swap_tables() {
        let mut router = Router::new("Engine");
        assert!(!router.dynamic_routes_loaded());

        router.install_menus(&[MenuNode::new("Stock", MenuType::DataList).with_path("/wms/stock")]);
        assert!(router.dynamic_routes_loaded());
        assert!(router.table().has_route("menu_wms_stock"));

        router.reset();
        assert!(!router.dynamic_routes_loaded());
        assert!(!router.table().has_route("menu_wms_stock"));
        assert!(router.current().is_none());
    }

    #[test]
    fn land_on_login_sets_current() {
        let mut router = Router::new("Engine");
        let nav = router.land_on(LOGIN_ROUTE).unwrap();
        assert_eq!(nav.path, "/login");
        assert_eq!(router.current().map(|n| n.route.as_str()), Some(LOGIN_ROUTE));
        assert!(router.path_for("task-detail").is_err());
    }
}
