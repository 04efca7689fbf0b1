use serde::Serialize;

use super::roles::Role;
use super::session::Session;

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Main,
    User,
}

/// A dashboard screen owned by exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub role: Role,
    pub path: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub placement: Placement,
}

const fn main_screen(
    role: Role,
    path: &'static str,
    label: &'static str,
    title: &'static str,
) -> Screen {
    Screen {
        role,
        path,
        label,
        title,
        placement: Placement::Main,
    }
}

const fn user_screen(role: Role, path: &'static str, label: &'static str) -> Screen {
    Screen {
        role,
        path,
        label,
        title: label,
        placement: Placement::User,
    }
}

static ECCD_OFFICE_SCREENS: [Screen; 8] = [
    main_screen(Role::EccdOffice, "/eccd_office", "Dashboard", "ECCD Office Dashboard"),
    main_screen(Role::EccdOffice, "/eccd_office/inbox", "Inbox", "Inbox"),
    main_screen(Role::EccdOffice, "/eccd_office/employee", "Employee", "Employee"),
    main_screen(Role::EccdOffice, "/eccd_office/reports", "Reports", "Reports"),
    main_screen(Role::EccdOffice, "/eccd_office/calendar", "Calendar", "Calendar"),
    main_screen(Role::EccdOffice, "/eccd_office/classroom", "Observation", "Classroom Observation"),
    user_screen(Role::EccdOffice, "/eccd_office/profile", "Profile"),
    user_screen(Role::EccdOffice, "/eccd_office/settings", "Settings"),
];

static SEED_TEACHER_SCREENS: [Screen; 8] = [
    main_screen(Role::SeedTeacher, "/seed_teacher", "Dashboard", "SEED Teacher Dashboard"),
    main_screen(Role::SeedTeacher, "/seed_teacher/enrollment", "Enrollment", "Enrollment"),
    main_screen(Role::SeedTeacher, "/seed_teacher/classlist", "Class List", "Class List"),
    main_screen(Role::SeedTeacher, "/seed_teacher/reports", "Reports", "Reports"),
    main_screen(Role::SeedTeacher, "/seed_teacher/calendar", "Calendar", "Calendar"),
    main_screen(Role::SeedTeacher, "/seed_teacher/inbox", "Inbox", "Inbox"),
    user_screen(Role::SeedTeacher, "/seed_teacher/profile", "Profile"),
    user_screen(Role::SeedTeacher, "/seed_teacher/settings", "Settings"),
];

static EDUCARE_TEACHER_SCREENS: [Screen; 8] = [
    main_screen(Role::EducareTeacher, "/educare_teacher", "Dashboard", "Educare Teacher Dashboard"),
    main_screen(Role::EducareTeacher, "/educare_teacher/enrollment", "Enrollment", "Enrollment"),
    main_screen(Role::EducareTeacher, "/educare_teacher/classlist", "Class List", "Class List"),
    main_screen(Role::EducareTeacher, "/educare_teacher/reports", "Reports", "Reports"),
    main_screen(Role::EducareTeacher, "/educare_teacher/calendar", "Calendar", "Calendar"),
    main_screen(Role::EducareTeacher, "/educare_teacher/inbox", "Inbox", "Inbox"),
    user_screen(Role::EducareTeacher, "/educare_teacher/profile", "Profile"),
    user_screen(Role::EducareTeacher, "/educare_teacher/settings", "Settings"),
];

static PARENT_SCREENS: [Screen; 6] = [
    main_screen(Role::Parent, "/parent", "Dashboard", "Parent Dashboard"),
    main_screen(Role::Parent, "/parent/child-info", "Child Info", "Child Information"),
    main_screen(Role::Parent, "/parent/schedule", "Schedule", "Schedule"),
    main_screen(Role::Parent, "/parent/inbox", "Inbox", "Inbox"),
    user_screen(Role::Parent, "/parent/profile", "Profile"),
    user_screen(Role::Parent, "/parent/settings", "Settings"),
];

pub const fn path_for_role(role: Role) -> &'static str {
    match role {
        Role::EccdOffice => "/eccd_office",
        Role::SeedTeacher => "/seed_teacher",
        Role::EducareTeacher => "/educare_teacher",
        Role::Parent => "/parent",
    }
}

/// Landing route for a raw role name; anything unrecognised goes back to sign-in.
pub fn path_for_role_name(role: &str) -> &'static str {
    Role::parse(role).map_or(LOGIN_ROUTE, path_for_role)
}

pub fn screens_for(role: Role) -> &'static [Screen] {
    match role {
        Role::EccdOffice => &ECCD_OFFICE_SCREENS,
        Role::SeedTeacher => &SEED_TEACHER_SCREENS,
        Role::EducareTeacher => &EDUCARE_TEACHER_SCREENS,
        Role::Parent => &PARENT_SCREENS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleNavigation {
    pub role_title: &'static str,
    pub base_path: &'static str,
    pub main_links: Vec<NavLink>,
    pub user_links: Vec<NavLink>,
}

impl RoleNavigation {
    pub fn is_active(&self, link_route: &str, pathname: &str) -> bool {
        is_active_route(self.base_path, link_route, pathname)
    }
}

pub fn navigation_for(role: Role) -> RoleNavigation {
    let links = |placement: Placement| -> Vec<NavLink> {
        screens_for(role)
            .iter()
            .filter(|screen| screen.placement == placement)
            .map(|screen| NavLink {
                label: screen.label,
                route: screen.path,
            })
            .collect()
    };

    RoleNavigation {
        role_title: role.sidebar_title(),
        base_path: path_for_role(role),
        main_links: links(Placement::Main),
        user_links: links(Placement::User),
    }
}

/// The dashboard link is only active on the dashboard itself; every other link is
/// active for anything beneath it.
pub fn is_active_route(base_path: &str, link_route: &str, pathname: &str) -> bool {
    if link_route == base_path {
        return pathname == link_route
            || pathname
                .strip_prefix(link_route)
                .is_some_and(|rest| rest == "/");
    }
    pathname.starts_with(link_route)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("sign in to continue")]
    LoginRequired,
    #[error("this screen belongs to another role")]
    Forbidden { home: &'static str },
    #[error("no such screen")]
    UnknownScreen,
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn owning_role(path: &str) -> Option<Role> {
    Role::ALL.into_iter().find(|role| {
        let base = path_for_role(*role);
        path == base
            || path
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Capability check run in front of every protected screen.
pub fn authorize(session: Option<&Session>, path: &str) -> Result<&'static Screen, AccessDenied> {
    let session = session.ok_or(AccessDenied::LoginRequired)?;
    let path = normalize(path);

    match owning_role(path) {
        Some(owner) if owner != session.role => Err(AccessDenied::Forbidden {
            home: path_for_role(session.role),
        }),
        Some(owner) => screens_for(owner)
            .iter()
            .find(|screen| screen.path == path)
            .ok_or(AccessDenied::UnknownScreen),
        None => Err(AccessDenied::UnknownScreen),
    }
}
