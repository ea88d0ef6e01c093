mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::TestConsole;
use workflow_admin::error::ApiError;
use workflow_admin::models::ListQuery;
use workflow_admin::router::{ViewKind, HOME_ROUTE, LOGIN_ROUTE, PROFILE_ROUTE};
use workflow_admin::session::SessionState;
use workflow_admin::storage::{Storage, MENUS_KEY, SYSTEM_SETTINGS_KEY, TOKEN_KEY, USER_KEY};
use workflow_admin::AppError;

#[tokio::test]
async fn login_lands_on_home_with_menu_routes() -> Result<()> {
    let mut console = TestConsole::start().await;
    common::mount_login(&console.server, common::user(false)).await;
    common::mount_menus(&console.server, common::sample_menus()).await;

    let navigation = console.ctx.login(&common::credentials()).await?;

    assert_eq!(navigation.route, HOME_ROUTE);
    assert!(navigation.warnings.is_empty());
    assert_eq!(console.ctx.session().state(), SessionState::Authenticated);
    assert_eq!(console.ctx.session().token().as_deref(), Some("t1"));
    assert_eq!(console.ctx.session().menus().len(), 2);

    let table = console.ctx.router().table();
    assert!(table.has_route("menu_wms_inbound"));
    assert!(table.has_route("menu_wms_stock"));
    assert!(!table.has_route("menu_reports_monthly"));

    assert_eq!(console.storage.get(TOKEN_KEY)?, Some(json!("t1")));
    assert!(console.storage.get(MENUS_KEY)?.is_some());
    assert_eq!(console.warnings(), 0);
    Ok(())
}

#[tokio::test]
async fn forced_password_change_lands_on_profile() -> Result<()> {
    let mut console = TestConsole::start().await;
    common::mount_login(&console.server, common::user(true)).await;
    common::mount_menus(&console.server, common::sample_menus()).await;

    let navigation = console.ctx.login(&common::credentials()).await?;

    assert_eq!(navigation.route, PROFILE_ROUTE);
    assert_eq!(navigation.warnings.len(), 1);
    assert_eq!(console.warnings(), 1);
    assert_eq!(console.ctx.session().state(), SessionState::PasswordChangeRequired);

    let stock = console.ctx.navigate("/wms/stock").await?;
    assert_eq!(stock.route, PROFILE_ROUTE);
    Ok(())
}

#[tokio::test]
async fn password_change_lifts_the_restriction() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("POST"))
        .and(path("/users/me/change-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&console.server)
        .await;
    console.login_as(common::user(true)).await?;

    console.ctx.change_password("secret", "n3w-secret").await?;

    assert_eq!(console.ctx.session().state(), SessionState::Authenticated);
    let home = console.ctx.navigate("/").await?;
    assert_eq!(home.route, HOME_ROUTE);
    assert!(!home.redirected());
    Ok(())
}

#[tokio::test]
async fn unauthorized_call_runs_logout() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/pending"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&console.server)
        .await;
    console.login_as(common::user(false)).await?;
    console.storage.set(SYSTEM_SETTINGS_KEY, json!({ "SYSTEM_NAME": "Flow" }))?;

    let err = console
        .ctx
        .call(|api| async move { api.get_pending_tasks(&ListQuery::page(0, 10)).await })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(console.ctx.session().state(), SessionState::Anonymous);
    assert!(console.ctx.session().menus().is_empty());
    assert!(!console.ctx.router().dynamic_routes_loaded());
    assert!(!console.ctx.router().table().has_route("menu_wms_stock"));
    assert_eq!(console.ctx.current().map(|n| n.route.as_str()), Some(LOGIN_ROUTE));

    for key in [TOKEN_KEY, USER_KEY, MENUS_KEY] {
        assert!(console.storage.get(key)?.is_none(), "{key} should be cleared");
    }
    assert!(console.storage.get(SYSTEM_SETTINGS_KEY)?.is_some());
    assert_eq!(console.errors(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_login_does_not_log_out() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad credentials" })))
        .mount(&console.server)
        .await;

    let err = console.ctx.login(&common::credentials()).await.unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::LoginFailed(_))));
    assert!(console.ctx.current().is_none());
    assert_eq!(console.errors(), 1);
    assert_eq!(console.notifier.notices()[0].message, "Login failed: bad credentials");
    Ok(())
}

#[tokio::test]
async fn password_change_status_on_login_is_left_to_the_caller() -> Result<()> {
    let mut console = TestConsole::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(499).set_body_json(json!({
            "message": "initial password must be changed",
            "token": "t1",
            "user": common::user(true)
        })))
        .mount(&console.server)
        .await;

    let err = console.ctx.login(&common::credentials()).await.unwrap_err();

    match err.api_error() {
        Some(ApiError::PasswordChangeRequired { body, .. }) => assert_eq!(body["token"], "t1"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(console.ctx.session().state(), SessionState::Anonymous);
    assert!(console.storage.get(TOKEN_KEY)?.is_none());
    assert!(console.notifier.notices().is_empty());
    Ok(())
}

#[tokio::test]
async fn reload_fetches_menus_and_replays_navigation() -> Result<()> {
    let mut console = TestConsole::start().await;
    console.login_as(common::user(false)).await?;

    let mut reopened = console.reopen();
    assert_eq!(reopened.session().state(), SessionState::Authenticated);
    assert!(!reopened.router().dynamic_routes_loaded());

    let navigation = reopened.navigate("/wms/stock").await?;

    assert_eq!(navigation.route, "menu_wms_stock");
    assert_eq!(navigation.view, ViewKind::DataList);
    assert_eq!(navigation.form_id, Some(8));
    assert_eq!(navigation.title, "Stock");
    assert!(!navigation.redirected());

    let menu_requests = console
        .server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/menus/my-menus")
        .count();
    assert_eq!(menu_requests, 2);
    Ok(())
}

#[tokio::test]
async fn reload_with_stale_token_logs_out() -> Result<()> {
    let console = TestConsole::start().await;
    console.storage.set(TOKEN_KEY, json!("stale"))?;
    console.storage.set(USER_KEY, common::user(false))?;
    Mock::given(method("GET"))
        .and(path("/menus/my-menus"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&console.server)
        .await;

    let mut ctx = console.reopen();
    let navigation = ctx.navigate("/tasks").await?;

    assert_eq!(navigation.route, LOGIN_ROUTE);
    assert_eq!(ctx.session().state(), SessionState::Anonymous);
    assert!(console.storage.get(TOKEN_KEY)?.is_none());
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_the_admin_role() -> Result<()> {
    let mut console = TestConsole::start().await;
    console.login_as(common::user(false)).await?;

    let denied = console.ctx.navigate("/admin/users").await?;
    assert_eq!(denied.route, HOME_ROUTE);
    assert_eq!(denied.warnings.len(), 1);

    let mut admin_console = TestConsole::start().await;
    admin_console.login_as(common::admin()).await?;
    let allowed = admin_console.ctx.navigate("/admin/users").await?;
    assert_eq!(allowed.route, "admin-users");
    assert_eq!(allowed.title, "User Management");
    assert_eq!(admin_console.warnings(), 0);
    Ok(())
}

#[tokio::test]
async fn authenticated_users_skip_login_page() -> Result<()> {
    let mut console = TestConsole::start().await;
    console.login_as(common::user(false)).await?;

    let navigation = console.ctx.navigate("/login").await?;
    assert_eq!(navigation.route, HOME_ROUTE);
    assert!(navigation.redirected());

    console.ctx.logout();
    let navigation = console.ctx.navigate("/login").await?;
    assert_eq!(navigation.route, LOGIN_ROUTE);
    Ok(())
}

#[tokio::test]
async fn pickers_are_cached_until_logout() -> Result<()> {
    let mut console = TestConsole::start().await;
    for (route, body) in [
        ("/admin/users", json!([{ "id": 7, "name": "Grace" }])),
        ("/admin/roles", json!([{ "id": 1, "name": "ADMIN" }])),
        ("/admin/groups", json!([{ "id": 2, "name": "Finance" }])),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::page(body, 1)))
            .mount(&console.server)
            .await;
    }
    console.login_as(common::admin()).await?;

    console.ctx.load_pickers().await?;
    assert_eq!(console.ctx.session().cached_users()[0].id, "7");
    assert_eq!(console.ctx.session().cached_roles().len(), 1);
    assert_eq!(console.ctx.session().cached_groups()[0].name, "Finance");

    console.ctx.logout();
    assert!(console.ctx.session().cached_users().is_empty());
    assert!(console.ctx.session().cached_groups().is_empty());
    Ok(())
}
