//! Client route table: patterns, per-route access metadata and the
//! redirects applied before the guard runs.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::Role;
use crate::util::query::parse_query;

pub const LOGIN_PATH: &str = "/login";
pub const TENANT_PARAM: &str = "empresaSlug";

/// Access requirements attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<Role>,
    pub requires_customer_auth: bool,
}

impl RouteMeta {
    const PUBLIC: Self = Self { requires_auth: false, role: None, requires_customer_auth: false };

    const fn staff(role: Role) -> Self {
        Self { requires_auth: true, role: Some(role), requires_customer_auth: false }
    }

    const CUSTOMER: Self = Self { requires_auth: false, role: None, requires_customer_auth: true };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

/// Path rewrite applied before the guard. `:params` carry over by name and
/// the query string is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRedirect {
    pub from: &'static str,
    pub to: &'static str,
}

/// A concrete location matched against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// `None` for paths no route matches; those are public.
    pub name: Option<&'static str>,
    pub path: String,
    /// Path plus query string, as the user navigated to it.
    pub full_path: String,
    pub params: Vec<(String, String)>,
    pub meta: RouteMeta,
}

impl ResolvedRoute {
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query pairs.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        self.full_path
            .split_once('?')
            .map(|(_, q)| parse_query(q.split('#').next().unwrap_or_default()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Route(ResolvedRoute),
    Redirect(String),
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
    redirects: Vec<RouteRedirect>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDef>, redirects: Vec<RouteRedirect>) -> Self {
        Self { routes, redirects }
    }

    /// The booking application's routes.
    #[must_use]
    pub fn standard() -> Self {
        let routes = vec![
            RouteDef { name: "Login", pattern: LOGIN_PATH, meta: RouteMeta::PUBLIC },
            RouteDef { name: "Admin", pattern: "/admin", meta: RouteMeta::staff(Role::SuperAdmin) },
            RouteDef { name: "Dueno", pattern: "/dueno", meta: RouteMeta::staff(Role::Dueno) },
            RouteDef { name: "Profesional", pattern: "/profesional", meta: RouteMeta::staff(Role::Profesional) },
            RouteDef { name: "ReservarTurno", pattern: "/reservar/:empresaSlug", meta: RouteMeta::PUBLIC },
            RouteDef {
                name: "RegistroCliente",
                pattern: "/empresa/:empresaSlug/registro-cliente",
                meta: RouteMeta::PUBLIC,
            },
            RouteDef { name: "LoginCliente", pattern: "/empresa/:empresaSlug/login-cliente", meta: RouteMeta::PUBLIC },
            RouteDef { name: "MisTurnos", pattern: "/empresa/:empresaSlug/mis-turnos", meta: RouteMeta::CUSTOMER },
        ];
        let redirects = vec![
            RouteRedirect { from: "/", to: LOGIN_PATH },
            RouteRedirect { from: "/empresa/:empresaSlug", to: "/reservar/:empresaSlug" },
        ];
        Self::new(routes, redirects)
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// Match `target` (path with optional query and hash).
    #[must_use]
    pub fn resolve(&self, target: &str) -> Resolution {
        let (path, suffix) = split_suffix(target);
        let path = normalize_path(path);

        for redirect in &self.redirects {
            if let Some(params) = match_pattern(redirect.from, &path) {
                return Resolution::Redirect(format!("{}{suffix}", fill_pattern(redirect.to, &params)));
            }
        }

        let full_path = format!("{path}{}", suffix.split('#').next().unwrap_or_default());
        for route in &self.routes {
            if let Some(params) = match_pattern(route.pattern, &path) {
                return Resolution::Route(ResolvedRoute {
                    name: Some(route.name),
                    path,
                    full_path,
                    params,
                    meta: route.meta,
                });
            }
        }
        Resolution::Route(ResolvedRoute { name: None, path, full_path, params: Vec::new(), meta: RouteMeta::PUBLIC })
    }
}

/// Split `target` into the path and everything from `?` or `#` on.
fn split_suffix(target: &str) -> (&str, &str) {
    match target.find(['?', '#']) {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &str) -> Option<Vec<(String, String)>> {
    let pattern_segments: Vec<&str> = segments(pattern).collect();
    let path_segments: Vec<&str> = segments(path).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }
    let mut params = Vec::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = expected.strip_prefix(':') {
            params.push((name.to_owned(), (*actual).to_owned()));
        } else if expected != actual {
            return None;
        }
    }
    Some(params)
}

fn fill_pattern(pattern: &str, params: &[(String, String)]) -> String {
    let filled: Vec<&str> = segments(pattern)
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| params.iter().find(|(k, _)| k == name))
                .map_or(segment, |(_, v)| v.as_str())
        })
        .collect();
    format!("/{}", filled.join("/"))
}
