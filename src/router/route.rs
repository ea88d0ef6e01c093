use std::collections::BTreeMap;

use serde::Serialize;

/// Which screen a route renders. Views are resolved lazily by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Login,
    Home,
    Profile,
    FormBuilder,
    FormViewer,
    FormSubmissions,
    WorkflowDesigner,
    TaskList,
    TaskDetail,
    MySubmissions,
    Notifications,
    AdminDashboard,
    AdminUsers,
    AdminRoles,
    AdminGroups,
    AdminMenus,
    AdminDepartments,
    AdminInstances,
    AdminLoginLogs,
    AdminOperationLogs,
    AdminSettings,
    /// Menu-driven form entry page
    FormEntry,
    /// Menu-driven data list page
    DataList,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Form definition injected by a menu entry
    pub form_id: Option<i64>,
    pub dynamic: bool,
}

impl Default for RouteMeta {
    fn default() -> Self {
        Self {
            title: None,
            requires_auth: true,
            requires_admin: false,
            form_id: None,
            dynamic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub view: ViewKind,
    pub meta: RouteMeta,
}

pub type RouteParams = BTreeMap<String, String>;

impl RouteEntry {
    pub fn new(path: &str, name: &str, view: ViewKind, title: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
            meta: RouteMeta {
                title: Some(title.to_string()),
                ..RouteMeta::default()
            },
        }
    }

    pub fn public(mut self) -> Self {
        self.meta.requires_auth = false;
        self
    }

    pub fn admin(mut self) -> Self {
        self.meta.requires_admin = true;
        self
    }

    pub fn has_params(&self) -> bool {
        self.path.split('/').any(|s| s.starts_with(':'))
    }

    /// Segment-wise match; `:name` segments capture.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let pattern: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (expected, got) in pattern.iter().zip(actual.iter()) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), (*got).to_string());
                }
                None if expected == got => {}
                None => return None,
            }
        }
        Some(params)
    }

    /// Fill `:name` segments from `params`
    pub fn build_path(&self, params: &RouteParams) -> Option<String> {
        let mut out = String::new();
        for segment in segments(&self.path) {
            out.push('/');
            match segment.strip_prefix(':') {
                Some(name) => out.push_str(params.get(name)?),
                None => out.push_str(segment),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Some(out)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_params_and_ignores_trailing_slash() {
        let route = RouteEntry::new("/tasks/:taskId", "task-detail", ViewKind::TaskDetail, "Task");
        let params = route.matches("/tasks/abc-1/").unwrap();
        assert_eq!(params.get("taskId").map(String::as_str), Some("abc-1"));
        assert!(route.matches("/tasks").is_none());
        assert!(route.matches("/forms/abc").is_none());
    }

    #[test]
    fn root_matches_only_root() {
        let home = RouteEntry::new("/", "home", ViewKind::Home, "Home");
        assert!(home.matches("/").is_some());
        assert!(home.matches("").is_some());
        assert!(home.matches("/tasks").is_none());
        assert_eq!(home.build_path(&RouteParams::new()).as_deref(), Some("/"));
    }

    #[test]
    fn build_path_requires_all_params() {
        let route = RouteEntry::new("/form/viewer/:formId", "form-viewer", ViewKind::FormViewer, "Fill");
        let mut params = RouteParams::new();
        assert!(route.build_path(&params).is_none());
        params.insert("formId".into(), "7".into());
        assert_eq!(route.build_path(&params).as_deref(), Some("/form/viewer/7"));
    }
}
