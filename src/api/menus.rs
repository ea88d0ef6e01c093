use super::Api;
use crate::error::ApiResult;
use crate::models::MenuNode;

impl Api {
    /// Menu tree the signed-in user is authorized to see
    pub async fn get_my_menus(&self) -> ApiResult<Vec<MenuNode>> {
        self.http.get("/menus/my-menus").await
    }

    pub async fn get_menu_tree(&self) -> ApiResult<Vec<MenuNode>> {
        self.http.get("/admin/menus/tree").await
    }

    pub async fn create_menu(&self, menu: &MenuNode) -> ApiResult<MenuNode> {
        self.http.post("/admin/menus", menu).await
    }

    pub async fn update_menu(&self, id: i64, menu: &MenuNode) -> ApiResult<MenuNode> {
        self.http.put(&format!("/admin/menus/{id}"), menu).await
    }

    pub async fn delete_menu(&self, id: i64) -> ApiResult<()> {
        self.http.delete(&format!("/admin/menus/{id}")).await
    }

    pub async fn update_menu_tree(&self, tree: &[MenuNode]) -> ApiResult<()> {
        self.http.put("/admin/menus/update-tree", tree).await
    }
}
