//! Navigation guard: an ordered rule list, first match wins.

use super::route::RouteEntry;
use super::table::{HOME_ROUTE, LOGIN_ROUTE, PROFILE_ROUTE};

/// Session facts the guard decides on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardContext {
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub dynamic_routes_loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow { title: String },
    Redirect { to: String, warning: Option<String> },
    /// Menus must be fetched and the navigation replayed
    LoadRoutesAndRetry,
}

impl GuardDecision {
    fn redirect(to: &str) -> Self {
        GuardDecision::Redirect {
            to: to.to_string(),
            warning: None,
        }
    }

    fn redirect_with_warning(to: &str, warning: &str) -> Self {
        GuardDecision::Redirect {
            to: to.to_string(),
            warning: Some(warning.to_string()),
        }
    }
}

pub type RuleFn = fn(&GuardContext, &RouteEntry) -> Option<GuardDecision>;

#[derive(Clone)]
pub struct GuardRule {
    pub name: &'static str,
    pub check: RuleFn,
}

impl std::fmt::Debug for GuardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardRule").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub struct NavigationGuard {
    rules: Vec<GuardRule>,
    default_title: String,
}

fn require_auth(ctx: &GuardContext, to: &RouteEntry) -> Option<GuardDecision> {
    (to.meta.requires_auth && !ctx.is_authenticated).then(|| GuardDecision::redirect(LOGIN_ROUTE))
}

fn skip_login_when_authenticated(ctx: &GuardContext, to: &RouteEntry) -> Option<GuardDecision> {
    (to.name == LOGIN_ROUTE && ctx.is_authenticated).then(|| GuardDecision::redirect(HOME_ROUTE))
}

fn load_dynamic_routes(ctx: &GuardContext, _to: &RouteEntry) -> Option<GuardDecision> {
    (ctx.is_authenticated && !ctx.dynamic_routes_loaded).then_some(GuardDecision::LoadRoutesAndRetry)
}

fn require_admin(ctx: &GuardContext, to: &RouteEntry) -> Option<GuardDecision> {
    (to.meta.requires_admin && !ctx.is_admin).then(|| {
        GuardDecision::redirect_with_warning(HOME_ROUTE, "You do not have permission to access this page.")
    })
}

fn force_password_change(ctx: &GuardContext, to: &RouteEntry) -> Option<GuardDecision> {
    (ctx.must_change_password && to.name != PROFILE_ROUTE).then(|| {
        GuardDecision::redirect_with_warning(
            PROFILE_ROUTE,
            "For security reasons, please change your initial password first.",
        )
    })
}

impl NavigationGuard {
    pub fn standard(default_title: impl Into<String>) -> Self {
        Self {
            rules: vec![
                GuardRule { name: "require-auth", check: require_auth },
                GuardRule { name: "skip-login", check: skip_login_when_authenticated },
                GuardRule { name: "load-dynamic-routes", check: load_dynamic_routes },
                GuardRule { name: "require-admin", check: require_admin },
                GuardRule { name: "force-password-change", check: force_password_change },
            ],
            default_title: default_title.into(),
        }
    }

    pub fn rules(&self) -> &[GuardRule] {
        &self.rules
    }

    pub fn evaluate(&self, ctx: &GuardContext, to: &RouteEntry) -> GuardDecision {
        for rule in &self.rules {
            if let Some(decision) = (rule.check)(ctx, to) {
                tracing::debug!("Guard rule '{}' matched for '{}'", rule.name, to.name);
                return decision;
            }
        }

        GuardDecision::Allow {
            title: to
                .meta
                .title
                .clone()
                .unwrap_or_else(|| self.default_title.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::table::RouteTable;

    fn route(name: &str) -> RouteEntry {
        RouteTable::static_table().get(name).cloned().unwrap()
    }

    fn signed_in() -> GuardContext {
        GuardContext {
            is_authenticated: true,
            is_admin: false,
            must_change_password: false,
            dynamic_routes_loaded: true,
        }
    }

    fn guard() -> NavigationGuard {
        NavigationGuard::standard("Form Workflow Engine")
    }

    #[test]
    fn anonymous_users_go_to_login() {
        let decision = guard().evaluate(&GuardContext::default(), &route("task-list"));
        assert_eq!(decision, GuardDecision::redirect(LOGIN_ROUTE));
    }

    #[test]
    fn anonymous_users_may_open_login() {
        let decision = guard().evaluate(&GuardContext::default(), &route(LOGIN_ROUTE));
        assert_eq!(decision, GuardDecision::Allow { title: "Login".into() });
    }

    #[test]
    fn authenticated_users_skip_login() {
        let decision = guard().evaluate(&signed_in(), &route(LOGIN_ROUTE));
        assert_eq!(decision, GuardDecision::redirect(HOME_ROUTE));
    }

    #[test]
    fn missing_dynamic_routes_trigger_reload() {
        let ctx = GuardContext {
            dynamic_routes_loaded: false,
            ..signed_in()
        };
        assert_eq!(guard().evaluate(&ctx, &route("task-list")), GuardDecision::LoadRoutesAndRetry);
    }

    #[test]
    fn non_admins_are_sent_home_with_warning() {
        match guard().evaluate(&signed_in(), &route("admin-users")) {
            GuardDecision::Redirect { to, warning } => {
                assert_eq!(to, HOME_ROUTE);
                assert!(warning.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }

        let admin = GuardContext { is_admin: true, ..signed_in() };
        assert!(matches!(
            guard().evaluate(&admin, &route("admin-users")),
            GuardDecision::Allow { .. }
        ));
    }

    #[test]
    fn forced_password_change_confines_to_profile() {
        let ctx = GuardContext {
            must_change_password: true,
            ..signed_in()
        };

        for name in [HOME_ROUTE, "task-list", "form-builder", "not-found"] {
            match guard().evaluate(&ctx, &route(name)) {
                GuardDecision::Redirect { to, warning } => {
                    assert_eq!(to, PROFILE_ROUTE);
                    assert!(warning.is_some());
                }
                other => panic!("{name}: unexpected {other:?}"),
            }
        }

        assert_eq!(
            guard().evaluate(&ctx, &route(PROFILE_ROUTE)),
            GuardDecision::Allow { title: "My Profile".into() }
        );
    }

    #[test]
    fn admin_rule_precedes_password_rule() {
        let ctx = GuardContext {
            must_change_password: true,
            ..signed_in()
        };
        match guard().evaluate(&ctx, &route("admin-settings")) {
            GuardDecision::Redirect { to, .. } => assert_eq!(to, HOME_ROUTE),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn untitled_routes_use_default_title() {
        let mut entry = route(HOME_ROUTE);
        entry.meta.title = None;
        assert_eq!(
            guard().evaluate(&signed_in(), &entry),
            GuardDecision::Allow { title: "Form Workflow Engine".into() }
        );
    }
}
