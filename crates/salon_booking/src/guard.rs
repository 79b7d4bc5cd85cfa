// --- File: crates/salon_booking/src/guard.rs ---
//! Page access rules.

use salon_common::SalonError;
use std::fmt;
use tracing::debug;

use crate::pending::PendingBookingStore;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Dashboard,
    Services,
    Appointments,
    Calendar,
    Employees,
    Clients,
    Hours,
    Gallery,
    Settings,
}

impl AdminSection {
    const ALL: [AdminSection; 9] = [
        AdminSection::Dashboard,
        AdminSection::Services,
        AdminSection::Appointments,
        AdminSection::Calendar,
        AdminSection::Employees,
        AdminSection::Clients,
        AdminSection::Hours,
        AdminSection::Gallery,
        AdminSection::Settings,
    ];

    fn segment(self) -> &'static str {
        match self {
            AdminSection::Dashboard => "",
            AdminSection::Services => "services",
            AdminSection::Appointments => "appointments",
            AdminSection::Calendar => "calendar",
            AdminSection::Employees => "employees",
            AdminSection::Clients => "clients",
            AdminSection::Hours => "hours",
            AdminSection::Gallery => "gallery",
            AdminSection::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    AuthChoice,
    Login,
    Register,
    Booking,
    MyAppointments,
    Admin(AdminSection),
}

/// Who may open a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// The session is still being restored.
    Wait,
    Redirect(Route),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::AuthChoice => "/auth-choice".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Booking => "/booking".to_string(),
            Route::MyAppointments => "/my-appointments".to_string(),
            Route::Admin(AdminSection::Dashboard) => "/admin".to_string(),
            Route::Admin(section) => format!("/admin/{}", section.segment()),
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let route = match path {
            "/" => Route::Home,
            "/auth-choice" => Route::AuthChoice,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/booking" => Route::Booking,
            "/my-appointments" => Route::MyAppointments,
            "/admin" => Route::Admin(AdminSection::Dashboard),
            other => {
                let segment = other.strip_prefix("/admin/")?;
                let section = AdminSection::ALL
                    .into_iter()
                    .find(|section| !segment.is_empty() && section.segment() == segment)?;
                Route::Admin(section)
            }
        };
        Some(route)
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::AuthChoice | Route::Login | Route::Register => Access::Public,
            Route::Booking | Route::MyAppointments => Access::Authenticated,
            Route::Admin(_) => Access::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decides whether `route` can be shown for the current session.
pub fn check(route: Route, state: &SessionState) -> GuardDecision {
    match route.access() {
        Access::Public => GuardDecision::Allow,
        _ if state.is_loading => GuardDecision::Wait,
        Access::Authenticated if state.identity.is_some() => GuardDecision::Allow,
        Access::Authenticated => GuardDecision::Redirect(Route::AuthChoice),
        Access::Admin if state.is_admin() => GuardDecision::Allow,
        Access::Admin => GuardDecision::Redirect(Route::Login),
    }
}

/// Like [`check`], and remembers `route` as the post-login destination when
/// an anonymous client is sent to the auth-choice page.
pub fn enter(
    route: Route,
    state: &SessionState,
    pending: &PendingBookingStore,
) -> Result<GuardDecision, SalonError> {
    let decision = check(route, state);
    if decision == GuardDecision::Redirect(Route::AuthChoice) {
        debug!("Remembering {} for after login", route);
        pending.set_return_destination(&route)?;
    }
    Ok(decision)
}
