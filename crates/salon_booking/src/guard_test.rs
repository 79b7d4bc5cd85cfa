#[cfg(test)]
mod tests {
    use crate::guard::{check, AdminSection, GuardDecision, Route};
    use crate::session::{Session, SessionState};
    use salon_common::models::{Role, UserProfile};

    fn state(role: Option<Role>) -> SessionState {
        SessionState {
            identity: role.map(|role| Session {
                profile: UserProfile {
                    id: 1,
                    email: "x@salon.fr".to_string(),
                    first_name: "X".to_string(),
                    last_name: "Y".to_string(),
                    phone: None,
                    role,
                },
                token: "jwt".to_string(),
            }),
            is_loading: false,
        }
    }

    #[test]
    fn test_route_paths_round_trip() {
        for path in ["/", "/auth-choice", "/booking", "/my-appointments", "/admin", "/admin/hours"] {
            assert_eq!(Route::from_path(path).unwrap().path(), path);
        }
        assert_eq!(
            Route::from_path("/admin/gallery"),
            Some(Route::Admin(AdminSection::Gallery))
        );
        assert_eq!(Route::from_path("/admin/"), None);
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_client_pages_redirect_anonymous_to_auth_choice() {
        let anonymous = state(None);
        assert_eq!(
            check(Route::Booking, &anonymous),
            GuardDecision::Redirect(Route::AuthChoice)
        );
        assert_eq!(
            check(Route::MyAppointments, &anonymous),
            GuardDecision::Redirect(Route::AuthChoice)
        );
        assert_eq!(check(Route::Booking, &state(Some(Role::Client))), GuardDecision::Allow);
    }

    #[test]
    fn test_admin_pages_redirect_to_login() {
        let dashboard = Route::Admin(AdminSection::Dashboard);
        assert_eq!(check(dashboard, &state(None)), GuardDecision::Redirect(Route::Login));
        assert_eq!(
            check(dashboard, &state(Some(Role::Client))),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(check(dashboard, &state(Some(Role::Admin))), GuardDecision::Allow);
    }

    #[test]
    fn test_loading_session_waits_on_protected_pages_only() {
        let loading = SessionState {
            identity: None,
            is_loading: true,
        };
        assert_eq!(check(Route::MyAppointments, &loading), GuardDecision::Wait);
        assert_eq!(check(Route::Login, &loading), GuardDecision::Allow);
    }
}
