//! Route table: a fixed static part plus routes derived from the menu tree.
//!
//! The table is rebuilt from scratch on every login and reset to the
//! static part on logout; [`RouteTable::add_dynamic_routes`] is idempotent
//! so replaying the same menu tree never produces duplicate names.

use std::collections::HashMap;

use crate::models::{MenuNode, MenuType};

use super::route::{RouteEntry, RouteMeta, RouteParams, ViewKind};

pub const LOGIN_ROUTE: &str = "login";
pub const HOME_ROUTE: &str = "home";
pub const PROFILE_ROUTE: &str = "profile";
pub const NOT_FOUND_ROUTE: &str = "not-found";

/// Menu types that have a page to render
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    views: HashMap<MenuType, ViewKind>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        let mut views = HashMap::new();
        views.insert(MenuType::FormEntry, ViewKind::FormEntry);
        views.insert(MenuType::DataList, ViewKind::DataList);
        Self { views }
    }
}

impl ViewRegistry {
    pub fn empty() -> Self {
        Self { views: HashMap::new() }
    }

    pub fn register(&mut self, menu_type: MenuType, view: ViewKind) {
        if menu_type.is_directory() {
            tracing::warn!("Ignoring view registration for directory menus");
            return;
        }
        self.views.insert(menu_type, view);
    }

    pub fn view_for(&self, menu_type: MenuType) -> Option<ViewKind> {
        self.views.get(&menu_type).copied()
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub entry: RouteEntry,
    pub params: RouteParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

/// Prefix that keeps menu route names apart from the static ones
pub const MENU_ROUTE_PREFIX: &str = "menu";

/// Route name for a menu path: `/wms/inbound` -> `menu_wms_inbound`.
///
/// `/` becomes `_`, while a literal `_` or `%` is percent-escaped, so two
/// distinct paths never share a name.
pub fn route_name_for(path: &str) -> String {
    let mut name = String::with_capacity(MENU_ROUTE_PREFIX.len() + path.len() + 1);
    name.push_str(MENU_ROUTE_PREFIX);
    if !path.starts_with('/') {
        name.push('_');
    }
    for c in path.chars() {
        match c {
            '/' => name.push('_'),
            '_' => name.push_str("%5F"),
            '%' => name.push_str("%25"),
            c => name.push(c),
        }
    }
    name
}

pub fn static_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/login", LOGIN_ROUTE, ViewKind::Login, "Login").public(),
        RouteEntry::new("/", HOME_ROUTE, ViewKind::Home, "Home"),
        RouteEntry::new("/profile", PROFILE_ROUTE, ViewKind::Profile, "My Profile"),
        RouteEntry::new("/form/builder", "form-builder", ViewKind::FormBuilder, "Form Builder"),
        RouteEntry::new("/form/viewer/:formId", "form-viewer", ViewKind::FormViewer, "Fill Form"),
        RouteEntry::new("/form/submissions/:formId", "form-submissions", ViewKind::FormSubmissions, "Submissions"),
        RouteEntry::new("/workflow/designer/:formId", "workflow-designer", ViewKind::WorkflowDesigner, "Workflow Designer"),
        RouteEntry::new("/tasks", "task-list", ViewKind::TaskList, "My Tasks"),
        RouteEntry::new("/tasks/:taskId", "task-detail", ViewKind::TaskDetail, "Handle Task"),
        RouteEntry::new("/my-submissions", "my-submissions", ViewKind::MySubmissions, "My Submissions"),
        RouteEntry::new("/notifications", "notifications", ViewKind::Notifications, "Notifications"),
        RouteEntry::new("/admin/dashboard", "admin-dashboard", ViewKind::AdminDashboard, "Dashboard").admin(),
        RouteEntry::new("/admin/users", "admin-users", ViewKind::AdminUsers, "User Management").admin(),
        RouteEntry::new("/admin/roles", "admin-roles", ViewKind::AdminRoles, "Role Management").admin(),
        RouteEntry::new("/admin/groups", "admin-groups", ViewKind::AdminGroups, "Group Management").admin(),
        RouteEntry::new("/admin/menus", "admin-menus", ViewKind::AdminMenus, "Menu Management").admin(),
        RouteEntry::new("/admin/departments", "admin-departments", ViewKind::AdminDepartments, "Departments").admin(),
        RouteEntry::new("/admin/instances", "admin-instances", ViewKind::AdminInstances, "Process Instances").admin(),
        RouteEntry::new("/admin/logs/login", "admin-login-logs", ViewKind::AdminLoginLogs, "Login Logs").admin(),
        RouteEntry::new("/admin/logs/operation", "admin-operation-logs", ViewKind::AdminOperationLogs, "Operation Logs").admin(),
        RouteEntry::new("/admin/settings", "admin-settings", ViewKind::AdminSettings, "System Settings").admin(),
        RouteEntry::new("/404", NOT_FOUND_ROUTE, ViewKind::NotFound, "Page Not Found").public(),
    ]
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::static_table()
    }
}

impl RouteTable {
    pub fn static_table() -> Self {
        Self {
            routes: static_routes(),
        }
    }

    /// Fresh table: static routes plus every navigable menu node
    pub fn with_menus(menus: &[MenuNode], registry: &ViewRegistry) -> Self {
        let mut table = Self::static_table();
        table.add_dynamic_routes(menus, registry);
        table
    }

    /// Register a route for every navigable node in the tree; returns how many
    /// were added. A path that is already registered is skipped.
    pub fn add_dynamic_routes(&mut self, menus: &[MenuNode], registry: &ViewRegistry) -> usize {
        let mut added = 0;
        for menu in menus {
            added += self.add_menu(menu, registry);
        }
        added
    }

    fn add_menu(&mut self, menu: &MenuNode, registry: &ViewRegistry) -> usize {
        let mut added = 0;

        if let Some(entry) = dynamic_entry(menu, registry) {
            if self.get(&entry.name).is_some_and(|r| r.path == entry.path) {
                tracing::debug!("Route '{}' already registered, skipping", entry.path);
            } else {
                tracing::debug!("Registering dynamic route '{}' -> {}", entry.name, entry.path);
                self.routes.push(entry);
                added += 1;
            }
        }

        // Directories are not routable but their children may be
        for child in &menu.children {
            added += self.add_menu(child, registry);
        }
        added
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.routes.iter().any(|r| r.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn dynamic_routes(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().filter(|r| r.meta.dynamic)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Literal paths win over parameterised ones; unknown paths land on not-found.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let literal = self
            .routes
            .iter()
            .filter(|r| !r.has_params())
            .find_map(|r| r.matches(path).map(|params| (r, params)));

        let found = literal.or_else(|| {
            self.routes
                .iter()
                .filter(|r| r.has_params())
                .find_map(|r| r.matches(path).map(|params| (r, params)))
        });

        let (entry, params) = match found {
            Some(hit) => hit,
            None => (self.get(NOT_FOUND_ROUTE)?, RouteParams::new()),
        };

        Some(ResolvedRoute {
            entry: entry.clone(),
            params,
        })
    }
}

fn dynamic_entry(menu: &MenuNode, registry: &ViewRegistry) -> Option<RouteEntry> {
    if menu.menu_type.is_directory() {
        return None;
    }
    let path = menu.route_path()?;
    let view = registry.view_for(menu.menu_type)?;

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    Some(RouteEntry {
        name: route_name_for(&path),
        path,
        view,
        meta: RouteMeta {
            title: Some(menu.name.clone()),
            requires_auth: true,
            requires_admin: false,
            form_id: menu.form_definition_id,
            dynamic: true,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<MenuNode> {
        vec![
            MenuNode::new("Warehouse", MenuType::Directory).with_children(vec![
                MenuNode::new("Inbound", MenuType::FormEntry)
                    .with_path("/wms/inbound")
                    .with_form(7),
                MenuNode::new("Stock", MenuType::DataList)
                    .with_path("/wms/stock")
                    .with_form(8),
                MenuNode::new("Nested", MenuType::Directory).with_children(vec![
                    MenuNode::new("Audit", MenuType::DataList).with_path("/wms/audit/list"),
                ]),
            ]),
            MenuNode::new("Monthly", MenuType::Report).with_path("/reports/monthly"),
            MenuNode::new("Docs", MenuType::ExternalLink).with_path("https://example.com"),
            MenuNode::new("No path", MenuType::FormEntry),
            MenuNode::new("Dir with path", MenuType::Directory).with_path("/dir"),
        ]
    }

    #[test]
    fn registers_only_navigable_nodes() {
        let table = RouteTable::with_menus(&sample_tree(), &ViewRegistry::default());
        let mut names: Vec<&str> = table.dynamic_routes().map(|r| r.name.as_str()).collect();
        names.sort();

        assert_eq!(names, vec!["menu_wms_audit_list", "menu_wms_inbound", "menu_wms_stock"]);
    }

    #[test]
    fn injects_form_id_and_title() {
        let table = RouteTable::with_menus(&sample_tree(), &ViewRegistry::default());
        let inbound = table.get("menu_wms_inbound").unwrap();

        assert_eq!(inbound.view, ViewKind::FormEntry);
        assert_eq!(inbound.meta.form_id, Some(7));
        assert_eq!(inbound.meta.title.as_deref(), Some("Inbound"));
        assert!(inbound.meta.requires_auth);
    }

    #[test]
    fn re_registering_is_idempotent() {
        let registry = ViewRegistry::default();
        let mut table = RouteTable::with_menus(&sample_tree(), &registry);
        let before = table.len();

        assert_eq!(table.add_dynamic_routes(&sample_tree(), &registry), 0);
        assert_eq!(table.len(), before);
    }

    #[test]
    fn registering_report_view_makes_reports_routable() {
        let mut registry = ViewRegistry::default();
        registry.register(MenuType::Report, ViewKind::DataList);
        registry.register(MenuType::Directory, ViewKind::DataList);

        let table = RouteTable::with_menus(&sample_tree(), &registry);
        assert!(table.has_route("menu_reports_monthly"));
        assert!(!table.has_route("menu_dir"));
    }

    #[test]
    fn route_names_are_unique_for_distinct_paths() {
        let paths = ["/a", "/a/b", "/a_b", "/a/_b", "/a_/b", "/a%5Fb", "/b/a", "/ab", "/home", "/"];
        let mut names: Vec<String> = paths.iter().map(|p| route_name_for(p)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), paths.len());

        let statics = RouteTable::static_table();
        assert!(paths.iter().all(|p| !statics.has_route(&route_name_for(p))));
    }

    #[test]
    fn underscore_and_slash_paths_both_register() {
        let table = RouteTable::with_menus(
            &[
                MenuNode::new("Flat", MenuType::DataList).with_path("/a_b"),
                MenuNode::new("Nested", MenuType::DataList).with_path("/a/b"),
            ],
            &ViewRegistry::default(),
        );

        assert_eq!(table.dynamic_routes().count(), 2);
        assert_eq!(table.resolve("/a_b").unwrap().entry.meta.title.as_deref(), Some("Flat"));
        assert_eq!(table.resolve("/a/b").unwrap().entry.meta.title.as_deref(), Some("Nested"));
    }

    #[test]
    fn menu_path_named_like_a_static_route_still_registers() {
        let table = RouteTable::with_menus(
            &[MenuNode::new("Landing", MenuType::FormEntry).with_path("/home")],
            &ViewRegistry::default(),
        );

        assert_eq!(table.dynamic_routes().count(), 1);
        let resolved = table.resolve("/home").unwrap();
        assert_eq!(resolved.entry.name, "menu_home");
        assert_eq!(resolved.entry.view, ViewKind::FormEntry);
        assert_eq!(table.get(HOME_ROUTE).map(|r| r.path.as_str()), Some("/"));
    }

    #[test]
    fn resolves_literal_before_param_and_falls_back_to_not_found() {
        let table = RouteTable::with_menus(
            &[MenuNode::new("Archive", MenuType::DataList).with_path("/tasks/archive")],
            &ViewRegistry::default(),
        );

        assert_eq!(table.resolve("/tasks/archive").unwrap().entry.name, "menu_tasks_archive");
        let detail = table.resolve("/tasks/t-9").unwrap();
        assert_eq!(detail.entry.name, "task-detail");
        assert_eq!(detail.params.get("taskId").map(String::as_str), Some("t-9"));
        assert_eq!(table.resolve("/nope").unwrap().entry.name, NOT_FOUND_ROUTE);
    }

    #[test]
    fn static_table_has_unique_names() {
        let table = RouteTable::static_table();
        let mut names: Vec<&str> = table.routes().iter().map(|r| r.name.as_str()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(table.dynamic_routes().count(), 0);
    }
}
