//! Route admission gate.
//!
//! A pure state machine evaluated for every gated navigation. It takes a
//! snapshot of the session store and a route target and yields exactly one
//! admission state, checked in a strict order:
//!
//! 1. store still loading
//! 2. no identity
//! 3. identity lacks the required role
//! 4. application root requested
//! 5. login/registration page requested while authenticated
//! 6. admitted
//!
//! The gate holds no state of its own and performs no IO; the extractors in
//! [`crate::middleware`] feed it and translate its decisions into HTTP
//! responses.

use portal_core::Role;

use crate::models::CurrentUser;

/// Login path used for unauthenticated redirects.
pub const LOGIN_PATH: &str = "/login";

/// Registration path.
pub const REGISTER_PATH: &str = "/register";

/// Notice shown when an unauthenticated visitor hits a gated route.
pub const RESTRICTED_NOTICE: &str = "Acesso restrito. Faça login para continuar.";

/// Notice shown when an authenticated user lacks the required role.
pub const DENIED_NOTICE: &str = "Acesso negado. Você não tem permissão para acessar esta página.";

/// Snapshot of the session store at evaluation time.
///
/// `loading` is true while the session backend has not answered yet; a
/// failed session read is surfaced as a still-loading snapshot so that no
/// admission decision is made on unknown state.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Whether the session store has finished resolving.
    pub loading: bool,
    /// The resolved identity, if any.
    pub user: Option<CurrentUser>,
}

impl SessionSnapshot {
    /// A resolved snapshot for the given identity (or anonymous).
    #[must_use]
    pub const fn resolved(user: Option<CurrentUser>) -> Self {
        Self {
            loading: false,
            user,
        }
    }

    /// A snapshot for a store that has not resolved yet.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            loading: true,
            user: None,
        }
    }
}

/// The navigation target being gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTarget<'a> {
    path: &'a str,
    required_role: Option<Role>,
}

impl<'a> RouteTarget<'a> {
    /// Classify a request path into a route target.
    ///
    /// `/admin/*` declares the administrator role. `/funcionario/*` declares
    /// no role: any authenticated identity may reach it, which keeps the
    /// insufficient-role redirect target itself reachable.
    #[must_use]
    pub fn classify(path: &'a str) -> Self {
        let required_role = if path == "/admin" || path.starts_with("/admin/") {
            Some(Role::Admin)
        } else {
            None
        };

        Self {
            path,
            required_role,
        }
    }

    /// A target with an explicit required role, for routes whose role gate
    /// is not derivable from the path.
    #[must_use]
    pub const fn with_required_role(path: &'a str, required_role: Option<Role>) -> Self {
        Self {
            path,
            required_role,
        }
    }

    const fn is_root(&self) -> bool {
        matches!(self.path.as_bytes(), b"/" | b"")
    }

    fn is_auth_page(&self) -> bool {
        self.path == LOGIN_PATH || self.path == REGISTER_PATH
    }
}

/// The admission state yielded by one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The session store has not resolved; no decision can be made.
    Loading,
    /// No identity; redirect to the login path, carrying the originally
    /// requested path in a `from` query parameter.
    Unauthenticated {
        /// Login path with the `from` parameter appended.
        redirect: String,
    },
    /// Identity present but lacking the required role; redirect to the
    /// standard-member landing path, never the administrator one.
    InsufficientRole {
        /// The standard-member landing path.
        redirect: &'static str,
    },
    /// Authenticated visit to the application root; redirect to the
    /// role-appropriate landing path.
    RootRedirect {
        /// The landing path for the identity's role.
        redirect: &'static str,
    },
    /// Authenticated visit to a login/registration page; redirect to the
    /// role-appropriate landing path.
    AuthPageRedirect {
        /// The landing path for the identity's role.
        redirect: &'static str,
    },
    /// The request may proceed to its handler.
    Admitted,
}

/// Whether the identity in `user` satisfies `required_role`.
///
/// Absent identity never satisfies any role. An `admin` requirement is
/// satisfied by the administrator flag; any other requirement is an exact
/// role match.
#[must_use]
pub fn check_permission(user: Option<&CurrentUser>, required_role: Role) -> bool {
    match user {
        Some(user) => match required_role {
            Role::Admin => user.is_admin(),
            Role::Funcionario => user.role == Role::Funcionario,
        },
        None => false,
    }
}

/// Evaluate the gate for one route target against one session snapshot.
///
/// Pure and re-entrant; call it on every navigation with the latest
/// snapshot.
#[must_use]
pub fn evaluate(snapshot: &SessionSnapshot, target: &RouteTarget<'_>) -> Admission {
    if snapshot.loading {
        return Admission::Loading;
    }

    let Some(user) = snapshot.user.as_ref() else {
        return Admission::Unauthenticated {
            redirect: login_redirect(target.path),
        };
    };

    if let Some(required_role) = target.required_role
        && !check_permission(Some(user), required_role)
    {
        return Admission::InsufficientRole {
            redirect: Role::Funcionario.landing_path(),
        };
    }

    if target.is_root() {
        return Admission::RootRedirect {
            redirect: user.role.landing_path(),
        };
    }

    if target.is_auth_page() {
        return Admission::AuthPageRedirect {
            redirect: user.role.landing_path(),
        };
    }

    Admission::Admitted
}

/// Build the login redirect, preserving the requested path so a post-login
/// return is possible. Nothing consumes the parameter automatically.
fn login_redirect(from: &str) -> String {
    if from.is_empty() || from == "/" || from == LOGIN_PATH {
        LOGIN_PATH.to_owned()
    } else {
        format!("{LOGIN_PATH}?from={}", urlencode(from))
    }
}

/// Percent-encode a path for use inside a query parameter value.
fn urlencode(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use portal_core::{Email, UserId};

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("pessoa@example.com").unwrap(),
            role,
        }
    }

    #[test]
    fn test_loading_wins_for_every_target() {
        let snapshot = SessionSnapshot::loading();
        for path in ["/", "/login", "/register", "/admin/solicitacoes", "/funcionario/perfil"] {
            let target = RouteTarget::classify(path);
            assert_eq!(evaluate(&snapshot, &target), Admission::Loading, "path {path}");
        }
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_from() {
        let snapshot = SessionSnapshot::resolved(None);
        let target = RouteTarget::classify("/admin/gestao-funcionarios");

        let admission = evaluate(&snapshot, &target);
        assert_eq!(
            admission,
            Admission::Unauthenticated {
                redirect: "/login?from=/admin/gestao-funcionarios".to_owned(),
            }
        );
    }

    #[test]
    fn test_unauthenticated_root_redirects_without_from() {
        let snapshot = SessionSnapshot::resolved(None);
        let admission = evaluate(&snapshot, &RouteTarget::classify("/"));
        assert_eq!(
            admission,
            Admission::Unauthenticated {
                redirect: "/login".to_owned(),
            }
        );
    }

    #[test]
    fn test_insufficient_role_goes_to_member_landing() {
        let snapshot = SessionSnapshot::resolved(Some(user(Role::Funcionario)));
        let target = RouteTarget::classify("/admin/gestao-funcionarios");

        let admission = evaluate(&snapshot, &target);
        assert_eq!(
            admission,
            Admission::InsufficientRole {
                redirect: "/funcionario/solicitacoes",
            }
        );
    }

    #[test]
    fn test_insufficient_role_never_lands_on_admin_path() {
        let snapshot = SessionSnapshot::resolved(Some(user(Role::Funcionario)));
        for path in ["/admin", "/admin/relatorios", "/admin/solicitacoes"] {
            let target = RouteTarget::classify(path);
            match evaluate(&snapshot, &target) {
                Admission::InsufficientRole { redirect } => {
                    assert!(!redirect.starts_with("/admin"), "path {path}");
                }
                other => panic!("expected InsufficientRole for {path}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_member_routes_gate_on_authentication_only() {
        // Member screens declare no role, so both roles are admitted and
        // the insufficient-role redirect target stays reachable.
        let target = RouteTarget::classify("/funcionario/perfil");
        for role in [Role::Admin, Role::Funcionario] {
            let snapshot = SessionSnapshot::resolved(Some(user(role)));
            assert_eq!(evaluate(&snapshot, &target), Admission::Admitted, "role {role:?}");
        }
    }

    #[test]
    fn test_root_redirect_by_role() {
        let admin = SessionSnapshot::resolved(Some(user(Role::Admin)));
        assert_eq!(
            evaluate(&admin, &RouteTarget::classify("/")),
            Admission::RootRedirect {
                redirect: "/admin/solicitacoes",
            }
        );

        let member = SessionSnapshot::resolved(Some(user(Role::Funcionario)));
        assert_eq!(
            evaluate(&member, &RouteTarget::classify("/")),
            Admission::RootRedirect {
                redirect: "/funcionario/solicitacoes",
            }
        );
    }

    #[test]
    fn test_auth_page_redirect_when_already_authenticated() {
        let snapshot = SessionSnapshot::resolved(Some(user(Role::Admin)));
        for path in [LOGIN_PATH, REGISTER_PATH] {
            assert_eq!(
                evaluate(&snapshot, &RouteTarget::classify(path)),
                Admission::AuthPageRedirect {
                    redirect: "/admin/solicitacoes",
                },
                "path {path}"
            );
        }
    }

    #[test]
    fn test_auth_pages_admitted_when_anonymous_would_redirect_to_self() {
        // An anonymous visit to /login is still "unauthenticated", but the
        // redirect must not carry from=/login.
        let snapshot = SessionSnapshot::resolved(None);
        assert_eq!(
            evaluate(&snapshot, &RouteTarget::classify(LOGIN_PATH)),
            Admission::Unauthenticated {
                redirect: "/login".to_owned(),
            }
        );
    }

    #[test]
    fn test_gated_screen_admitted() {
        let snapshot = SessionSnapshot::resolved(Some(user(Role::Funcionario)));
        let target = RouteTarget::classify("/funcionario/solicitacoes");
        assert_eq!(evaluate(&snapshot, &target), Admission::Admitted);
    }

    #[test]
    fn test_check_permission_absent_identity() {
        assert!(!check_permission(None, Role::Admin));
        assert!(!check_permission(None, Role::Funcionario));
    }

    #[test]
    fn test_check_permission_role_matrix() {
        let admin = user(Role::Admin);
        let member = user(Role::Funcionario);

        assert!(check_permission(Some(&admin), Role::Admin));
        assert!(!check_permission(Some(&admin), Role::Funcionario));
        assert!(!check_permission(Some(&member), Role::Admin));
        assert!(check_permission(Some(&member), Role::Funcionario));
    }

    #[test]
    fn test_from_parameter_is_percent_encoded() {
        let snapshot = SessionSnapshot::resolved(None);
        let target = RouteTarget::classify("/funcionario/perfil?tab=dados pessoais");
        match evaluate(&snapshot, &target) {
            Admission::Unauthenticated { redirect } => {
                assert_eq!(
                    redirect,
                    "/login?from=/funcionario/perfil%3Ftab%3Ddados%20pessoais"
                );
            }
            other => panic!("expected Unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_required_role_override() {
        let snapshot = SessionSnapshot::resolved(Some(user(Role::Funcionario)));
        let target = RouteTarget::with_required_role("/relatorios", Some(Role::Admin));
        assert!(matches!(
            evaluate(&snapshot, &target),
            Admission::InsufficientRole { .. }
        ));
    }
}
