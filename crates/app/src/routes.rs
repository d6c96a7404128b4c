//! Route table: ordered `{pattern, access, view}` entries.

use crudops_auth::Access;

pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const STUDENTS: &str = "/students";
pub const STUDENTS_CREATE: &str = "/students/create";
pub const STUDENTS_EDIT: &str = "/students/edit";
pub const PAYMENTS: &str = "/payments";
pub const NOT_FOUND: &str = "/not-found";

/// Which view renders an allowed path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Login,
    Register,
    Dashboard,
    Students,
    StudentCreate,
    StudentEdit,
    Payments,
    NotFound,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub access: Access,
    pub view: ViewKind,
}

const fn route(pattern: &'static str, access: Access, view: ViewKind) -> RouteEntry {
    RouteEntry {
        pattern,
        access,
        view,
    }
}

pub static ROUTES: &[RouteEntry] = &[
    route(ROOT, Access::Public, ViewKind::Login),
    route(LOGIN, Access::Public, ViewKind::Login),
    route(REGISTER, Access::Public, ViewKind::Register),
    route(DASHBOARD, Access::Authenticated, ViewKind::Dashboard),
    route(STUDENTS, Access::Authenticated, ViewKind::Students),
    route(STUDENTS_CREATE, Access::Admin, ViewKind::StudentCreate),
    route(STUDENTS_EDIT, Access::Admin, ViewKind::StudentEdit),
    route(PAYMENTS, Access::Authenticated, ViewKind::Payments),
    route(NOT_FOUND, Access::Public, ViewKind::NotFound),
];

/// Entry whose pattern equals `path` exactly, if any.
pub fn lookup(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|r| r.pattern == path)
}

/// Paths that need any authenticated principal (includes the elevated set).
pub fn restricted_paths() -> impl Iterator<Item = &'static str> {
    ROUTES.iter().filter(|r| r.access.requires_auth()).map(|r| r.pattern)
}

/// Paths that need an admin principal.
pub fn elevated_paths() -> impl Iterator<Item = &'static str> {
    ROUTES.iter().filter(|r| r.access.requires_admin()).map(|r| r.pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        assert!(ROUTES.iter().all(|r| seen.insert(r.pattern)));
    }

    #[test]
    fn elevated_set_is_inside_restricted_set() {
        let restricted: Vec<_> = restricted_paths().collect();
        assert!(elevated_paths().all(|p| restricted.contains(&p)));
        assert_eq!(
            elevated_paths().collect::<Vec<_>>(),
            vec![STUDENTS_CREATE, STUDENTS_EDIT]
        );
    }

    #[test]
    fn unknown_path_has_no_entry() {
        assert!(lookup("/reports").is_none());
        assert_eq!(lookup(LOGIN).map(|r| r.view), Some(ViewKind::Login));
    }
}
