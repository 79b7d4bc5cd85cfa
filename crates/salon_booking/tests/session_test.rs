
use fixtures::*;
use salon_booking::guard::{self, GuardDecision, Route};
use salon_booking::registration::RegistrationForm;
use salon_common::storage::keys;
use salon_common::{KeyValueStore, SalonError};

fn harness_with(identity: FakeIdentity) -> Harness {
    Harness::with_identity(salon(), FakeAppointments::new(), identity)
}

#[tokio::test]
async fn test_session_starts_loading_and_guard_waits() {
    let harness = Harness::new(salon(), FakeAppointments::new());

    let state = harness.session.state();
    assert!(state.is_loading);
    assert_eq!(guard::check(Route::Booking, &state), GuardDecision::Wait);
    assert_eq!(guard::check(Route::Home, &state), GuardDecision::Allow);
}

#[tokio::test]
async fn test_restore_with_valid_credential() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    harness.store.set(keys::TOKEN, CLIENT_TOKEN).unwrap();
    let mut updates = harness.session.subscribe();

    let session = harness.session.restore().await.unwrap();

    assert_eq!(session.profile.email, "marie@example.fr");
    assert_eq!(harness.credentials.bearer().as_deref(), Some(CLIENT_TOKEN));
    assert!(updates.has_changed().unwrap());
    let state = updates.borrow_and_update().clone();
    assert!(!state.is_loading);
    assert_eq!(guard::check(Route::MyAppointments, &state), GuardDecision::Allow);
}

#[tokio::test]
async fn test_restore_drops_rejected_credential() {
    let identity = FakeIdentity::new(client_profile())
        .current_user_answers(Err(SalonError::AuthError("Token has expired".to_string())));
    let harness = harness_with(identity);
    harness.store.set(keys::TOKEN, "expired").unwrap();

    assert!(harness.session.restore().await.is_none());

    assert!(harness.raw(keys::TOKEN).is_none());
    assert!(!harness.credentials.is_present());
    assert!(!harness.session.state().is_loading);
}

#[tokio::test]
async fn test_restore_falls_back_to_cached_profile_when_offline() {
    let identity = FakeIdentity::new(client_profile())
        .current_user_answers(Err(SalonError::HttpError("connection refused".to_string())));
    let harness = harness_with(identity);
    harness.store.set(keys::TOKEN, CLIENT_TOKEN).unwrap();
    harness
        .store
        .set(keys::USER, &serde_json::to_string(&client_profile()).unwrap())
        .unwrap();

    let session = harness.session.restore().await.unwrap();

    assert_eq!(session.profile, client_profile());
    assert_eq!(harness.raw(keys::TOKEN).as_deref(), Some(CLIENT_TOKEN));
}

#[tokio::test]
async fn test_login_persists_credential_and_profile() {
    let harness = Harness::new(salon(), FakeAppointments::new());

    let session = harness
        .session
        .login("marie@example.fr", CLIENT_PASSWORD)
        .await
        .unwrap();

    assert_eq!(session.token, CLIENT_TOKEN);
    assert_eq!(harness.raw(keys::TOKEN).as_deref(), Some(CLIENT_TOKEN));
    assert!(harness.raw(keys::USER).unwrap().contains("marie@example.fr"));
    assert!(harness.credentials.is_present());
}

#[tokio::test]
async fn test_failed_login_reports_backend_message() {
    let harness = Harness::new(salon(), FakeAppointments::new());

    let err = harness
        .session
        .login("marie@example.fr", "wrong-password")
        .await
        .unwrap_err();

    assert_eq!(err.backend_message(), Some("Email ou mot de passe incorrect"));
    assert!(harness.session.current().is_none());
    assert!(harness.raw(keys::TOKEN).is_none());
}

#[tokio::test]
async fn test_register_validates_before_calling_backend() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    let form = RegistrationForm {
        first_name: "Léa".to_string(),
        last_name: "Bernard".to_string(),
        email: "lea@example.fr".to_string(),
        phone: String::new(),
        password: "abc".to_string(),
        confirm_password: "abd".to_string(),
    };

    let err = harness.session.register(&form).await.unwrap_err();

    assert!(matches!(err, SalonError::ValidationError(_)));
    assert!(harness.identity.registrations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_signs_in() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    let form = RegistrationForm {
        first_name: "Léa".to_string(),
        last_name: "Bernard".to_string(),
        email: "lea@example.fr".to_string(),
        phone: "0612345678".to_string(),
        password: "abcdef".to_string(),
        confirm_password: "abcdef".to_string(),
    };

    let session = harness.session.register(&form).await.unwrap();

    assert_eq!(session.profile.email, "lea@example.fr");
    let sent = harness.identity.registrations.lock().unwrap().clone();
    assert_eq!(sent[0].phone.as_deref(), Some("0612345678"));
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    harness
        .session
        .login("marie@example.fr", CLIENT_PASSWORD)
        .await
        .unwrap();

    harness.session.logout();

    assert!(harness.session.current().is_none());
    assert!(harness.raw(keys::TOKEN).is_none());
    assert!(harness.raw(keys::USER).is_none());
    assert!(!harness.credentials.is_present());
}

#[tokio::test]
async fn test_admin_pages_require_admin_role() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    harness.session.restore().await;
    let admin_page = Route::from_path("/admin/services").unwrap();

    assert_eq!(
        guard::check(admin_page, &harness.session.state()),
        GuardDecision::Redirect(Route::Login)
    );

    harness
        .session
        .login("marie@example.fr", CLIENT_PASSWORD)
        .await
        .unwrap();
    assert_eq!(
        guard::check(admin_page, &harness.session.state()),
        GuardDecision::Redirect(Route::Login)
    );

    let admin = harness_with(FakeIdentity::new(admin_profile()));
    admin.store.set(keys::TOKEN, "admin-token").unwrap();
    admin.session.restore().await;
    assert_eq!(
        guard::check(admin_page, &admin.session.state()),
        GuardDecision::Allow
    );
}

#[tokio::test]
async fn test_anonymous_booking_visit_is_remembered_for_after_login() {
    let harness = Harness::new(salon(), FakeAppointments::new());
    harness.session.restore().await;
    let pending = harness.pending();

    let decision = guard::enter(Route::Booking, &harness.session.state(), &pending).unwrap();

    assert_eq!(decision, GuardDecision::Redirect(Route::AuthChoice));
    assert_eq!(harness.raw(keys::REDIRECT_AFTER_LOGIN).as_deref(), Some("/booking"));
    assert_eq!(pending.post_login_destination(), Route::Booking);
    assert_eq!(pending.post_login_destination(), Route::Home);
}
