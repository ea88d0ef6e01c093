use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuType {
    /// Grouping only, never navigable
    Directory,
    FormEntry,
    DataList,
    Report,
    ExternalLink,
}

impl MenuType {
    pub fn is_directory(&self) -> bool {
        matches!(self, MenuType::Directory)
    }
}

/// One node of the server-defined menu tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    // Left out of the payload when empty
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub menu_type: MenuType,
    #[serde(default)]
    pub component_path: Option<String>,
    #[serde(default)]
    pub form_definition_id: Option<i64>,
    #[serde(default)]
    pub order_num: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub role_names: Vec<String>,
    #[serde(default)]
    pub data_scope: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

fn default_visible() -> bool {
    true
}

impl MenuNode {
    pub fn new(name: impl Into<String>, menu_type: MenuType) -> Self {
        Self {
            id: None,
            parent_id: None,
            name: name.into(),
            path: None,
            icon: None,
            menu_type,
            component_path: None,
            form_definition_id: None,
            order_num: None,
            visible: true,
            role_names: Vec::new(),
            data_scope: None,
            children: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_form(mut self, form_id: i64) -> Self {
        self.form_definition_id = Some(form_id);
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Non-empty path, if any
    pub fn route_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}
