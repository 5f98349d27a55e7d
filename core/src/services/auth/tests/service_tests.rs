//! Behavioral tests for `AuthService`

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::Notify;

use super::mocks::{principal, MockIdentityProvider, MockOtpProvider};
use crate::domain::entities::principal::ProviderPrincipal;
use crate::domain::value_objects::phone_auth::{PhoneAuthState, VerificationId};
use crate::domain::value_objects::profile::ProfileUpdate;
use crate::errors::{AuthError, ProviderError};
use crate::providers::directory::{InMemoryUserDirectory, NewUserRecord, UserDirectory};
use crate::services::auth::{AuthService, SignUpRequest};

use wavely_shared::AuthFlowConfig;

type Service = AuthService<MockIdentityProvider, MockOtpProvider, InMemoryUserDirectory>;

type Harness = (
    Arc<Service>,
    Arc<MockIdentityProvider>,
    Arc<MockOtpProvider>,
    Arc<InMemoryUserDirectory>,
);

fn harness() -> Harness {
    harness_with(MockIdentityProvider::new(), AuthFlowConfig::default())
}

fn harness_with(identity: MockIdentityProvider, config: AuthFlowConfig) -> Harness {
    let identity = Arc::new(identity);
    let otp = Arc::new(MockOtpProvider::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let service = Arc::new(AuthService::new(
        identity.clone(),
        otp.clone(),
        directory.clone(),
        config,
    ));
    (service, identity, otp, directory)
}

fn vid(s: &str) -> VerificationId {
    VerificationId(s.to_string())
}

fn sign_up_request() -> SignUpRequest {
    SignUpRequest {
        email: "jane@example.com".to_string(),
        password: "Str0ngPass".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        username: "jane.doe".to_string(),
        phone_number: Some("+15551234567".to_string()),
    }
}

async fn seed_record(directory: &InMemoryUserDirectory, uid: &str, username: &str, email: &str) {
    directory
        .create(NewUserRecord {
            uid: uid.to_string(),
            display_name: None,
            email: Some(email.to_string()),
            photo_url: None,
            username: Some(username.to_string()),
        })
        .await
        .unwrap();
}

// --- Google sign-in ------------------------------------------------------

#[tokio::test]
async fn test_google_sign_in_publishes_session() {
    let (service, identity, _, directory) = harness();
    identity.queue_google(Ok(principal("g1")));

    service.sign_in_with_google().await.unwrap();

    let session = service.session().unwrap();
    assert_eq!(session.provider_uid, "g1");
    assert_eq!(session.email.as_deref(), Some("g1@example.com"));
    assert!(service.is_authenticated());
    assert!(!service.is_loading());
    assert!(service.last_error().is_none());
    assert!(directory.record("g1").await.is_some());
}

#[tokio::test]
async fn test_cancelled_google_sign_in_is_quiet() {
    let (service, identity, _, _) = harness();
    identity.queue_google(Err(ProviderError::Cancelled));

    service.sign_in_with_google().await.unwrap();

    assert!(service.session().is_none());
    assert!(!service.is_authenticated());
    assert!(service.last_error().is_none());
}

#[tokio::test]
async fn test_google_failure_publishes_normalized_error() {
    let (service, identity, _, _) = harness();
    identity.queue_google(Err(ProviderError::Network));

    let err = service.sign_in_with_google().await.unwrap_err();

    assert_eq!(err, AuthError::NetworkError);
    assert_eq!(service.last_error(), Some(AuthError::NetworkError));
    assert!(!service.is_authenticated());
    assert!(!service.is_loading());
}

#[tokio::test]
async fn test_overlapping_operation_is_a_noop() {
    let hold = Arc::new(Notify::new());
    let mut identity = MockIdentityProvider::new();
    identity.hold = Some(hold.clone());
    identity.queue_google(Ok(principal("g1")));
    let (service, identity, _, _) = harness_with(identity, AuthFlowConfig::default());

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.sign_in_with_google().await })
    };
    tokio::task::yield_now().await;
    assert!(service.is_loading());

    // Second dispatch while the first is held open: no-op, single provider call
    service.sign_in_with_google().await.unwrap();
    assert_eq!(identity.google_calls.load(Ordering::SeqCst), 1);

    hold.notify_one();
    first.await.unwrap().unwrap();
    assert!(service.is_authenticated());
    assert!(!service.is_loading());
}

#[tokio::test]
async fn test_new_operation_clears_previous_error() {
    let (service, identity, _, _) = harness();
    identity.queue_google(Err(ProviderError::Network));
    identity.queue_google(Ok(principal("g1")));

    service.sign_in_with_google().await.unwrap_err();
    assert!(service.last_error().is_some());

    service.sign_in_with_google().await.unwrap();
    assert!(service.last_error().is_none());
}

// --- identifier + password sign-in ---------------------------------------

#[tokio::test]
async fn test_email_identifier_goes_straight_to_provider() {
    let (service, identity, _, _) = harness();
    identity.queue_password(Ok(principal("u1")));

    service
        .sign_in_with_identifier_password("jane@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(
        identity.last_email.lock().unwrap().as_deref(),
        Some("jane@example.com")
    );
    assert!(service.is_authenticated());
}

#[tokio::test]
async fn test_username_identifier_resolves_through_directory() {
    let (service, identity, _, directory) = harness();
    seed_record(&directory, "u1", "jane.doe", "jane@example.com").await;
    identity.queue_password(Ok(principal("u1")));

    service
        .sign_in_with_identifier_password("jane.doe", "pw")
        .await
        .unwrap();

    assert_eq!(
        identity.last_email.lock().unwrap().as_deref(),
        Some("jane@example.com")
    );
    let session = service.session().unwrap();
    assert_eq!(session.provider_uid, "u1");
}

#[tokio::test]
async fn test_unresolvable_username_is_account_not_found() {
    let (service, identity, _, _) = harness();

    let err = service
        .sign_in_with_identifier_password("jane.doe", "pw")
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::AccountNotFound);
    assert_eq!(service.last_error(), Some(AuthError::AccountNotFound));
    // The provider is never contacted without a resolved email
    assert_eq!(identity.password_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unclassifiable_identifier_is_rejected_locally() {
    let (service, identity, _, _) = harness();

    let err = service
        .sign_in_with_identifier_password("??", "pw")
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::IdentifierInvalid);
    assert_eq!(identity.password_calls.load(Ordering::SeqCst), 0);
}

// --- email sign-up -------------------------------------------------------

#[tokio::test]
async fn test_sign_up_builds_profile_and_directory_record() {
    let (service, identity, _, directory) = harness();
    identity.queue_create(Ok(principal("new1")));

    service.sign_up_with_email(sign_up_request()).await.unwrap();

    let session = service.session().unwrap();
    assert_eq!(session.provider_uid, "new1");
    assert_eq!(session.display_name.as_deref(), Some("Jane Doe"));
    assert_eq!(session.username.as_deref(), Some("jane.doe"));
    assert_eq!(session.phone_number.as_deref(), Some("+15551234567"));

    let record = directory.record("new1").await.unwrap();
    assert_eq!(record.username.as_deref(), Some("jane.doe"));
    assert_eq!(record.phone_number.as_deref(), Some("+15551234567"));
}

#[tokio::test]
async fn test_weak_password_never_reaches_the_provider() {
    let (service, identity, _, _) = harness();

    let mut request = sign_up_request();
    request.password = "short".to_string();
    let err = service.sign_up_with_email(request).await.unwrap_err();

    assert_eq!(err, AuthError::WeakPassword);
    assert_eq!(identity.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_configured_minimum_password_length_is_enforced() {
    let identity = MockIdentityProvider::new();
    let config = AuthFlowConfig::default().with_min_password_length(12);
    let (service, identity, _, _) = harness_with(identity, config);

    // Mixed case and ten characters: passes the default policy, not this one
    let mut request = sign_up_request();
    request.password = "Abcdefghij".to_string();
    let err = service.sign_up_with_email(request).await.unwrap_err();

    assert_eq!(err, AuthError::WeakPassword);
    assert_eq!(identity.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_up_rejected_when_registration_disabled() {
    let identity = MockIdentityProvider::new();
    let config = AuthFlowConfig::default().without_registration();
    let (service, identity, _, _) = harness_with(identity, config);

    let err = service.sign_up_with_email(sign_up_request()).await.unwrap_err();

    assert!(matches!(err, AuthError::Unknown { .. }));
    assert_eq!(identity.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_up_rejects_taken_username() {
    let (service, identity, _, directory) = harness();
    seed_record(&directory, "other", "jane.doe", "other@example.com").await;

    let err = service.sign_up_with_email(sign_up_request()).await.unwrap_err();

    assert!(matches!(err, AuthError::Unknown { .. }));
    assert_eq!(identity.create_calls.load(Ordering::SeqCst), 0);
}

// --- phone verification --------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_first_phone_sign_in_gets_placeholder_identity() {
    let (service, _, otp, directory) = harness();
    otp.queue_request(Ok(vid("vid1")));
    otp.queue_confirm(Ok(ProviderPrincipal::new("phone1")));

    service.send_verification_code("+15551234567").await.unwrap();
    assert!(service.phone_auth_state().is_awaiting_verification());
    assert!(!service.can_resend_code());

    // The keystroke completing six digits dispatches verification
    service.append_code_digits("12a3").await.unwrap();
    service.append_code_digits("456").await.unwrap();

    assert_eq!(service.phone_auth_state(), PhoneAuthState::Verified);
    let session = service.session().unwrap();
    assert!(session
        .display_name
        .as_deref()
        .is_some_and(|name| name.starts_with("Member ")));
    let record = directory.record("phone1").await.unwrap();
    assert!(record.username.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_completed_code_is_not_lost_while_another_operation_runs() {
    let hold = Arc::new(Notify::new());
    let mut identity = MockIdentityProvider::new();
    identity.hold = Some(hold.clone());
    identity.queue_google(Ok(principal("g1")));
    let (service, _, otp, _) = harness_with(identity, AuthFlowConfig::default());
    otp.queue_request(Ok(vid("vid1")));
    otp.queue_confirm(Ok(ProviderPrincipal::new("phone1")));

    service.send_verification_code("+15551234567").await.unwrap();

    let google = {
        let service = service.clone();
        tokio::spawn(async move { service.sign_in_with_google().await })
    };
    tokio::task::yield_now().await;

    // The buffer fills while the guard is held: dispatch is rejected and the
    // buffer cleared rather than left stuck full
    service.append_code_digits("123456").await.unwrap();
    assert_eq!(otp.confirm_calls.load(Ordering::SeqCst), 0);

    hold.notify_one();
    google.await.unwrap().unwrap();

    // Re-entering the code now verifies normally
    service.append_code_digits("123456").await.unwrap();
    assert_eq!(otp.confirm_calls.load(Ordering::SeqCst), 1);
    assert_eq!(service.phone_auth_state(), PhoneAuthState::Verified);
}

#[tokio::test]
async fn test_unusable_phone_numbers_are_rejected_locally() {
    let (service, _, otp, _) = harness();

    let err = service.send_verification_code("  ").await.unwrap_err();
    assert_eq!(err, AuthError::MissingPhoneNumber);

    let err = service.send_verification_code("not-a-phone").await.unwrap_err();
    assert_eq!(err, AuthError::IdentifierInvalid);

    assert_eq!(otp.request_calls.load(Ordering::SeqCst), 0);
    assert_eq!(service.phone_auth_state(), PhoneAuthState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_returning_phone_user_keeps_profile_and_single_record() {
    let (service, _, otp, directory) = harness();
    seed_record(&directory, "phone1", "jane.doe", "jane@example.com").await;

    let mut returning = ProviderPrincipal::new("phone1");
    returning.last_sign_in_at = returning.created_at + chrono::Duration::seconds(60);
    otp.queue_request(Ok(vid("vid1")));
    otp.queue_confirm(Ok(returning));

    service.send_verification_code("+15551234567").await.unwrap();
    service.verify_code("123456").await.unwrap();

    // No placeholder for a returning account, and no second record
    let session = service.session().unwrap();
    assert!(session.display_name.is_none());
    assert_eq!(directory.len().await, 1);
    assert!(directory
        .record("phone1")
        .await
        .unwrap()
        .last_login_at
        .is_some());
}

// --- sign-out ------------------------------------------------------------

#[tokio::test]
async fn test_sign_out_clears_all_published_state() {
    let (service, identity, _, _) = harness();
    identity.queue_google(Ok(principal("g1")));
    service.sign_in_with_google().await.unwrap();

    service.sign_out().await.unwrap();

    assert!(service.session().is_none());
    assert!(!service.is_authenticated());
    assert_eq!(service.phone_auth_state(), PhoneAuthState::Idle);
    assert_eq!(identity.sign_out_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_sign_out_clears_locally_even_when_provider_fails() {
    let (service, identity, _, _) = harness();
    identity.queue_google(Ok(principal("g1")));
    service.sign_in_with_google().await.unwrap();
    identity.queue_sign_out(Err(ProviderError::Network));

    let err = service.sign_out().await.unwrap_err();

    assert_eq!(err, AuthError::NetworkError);
    assert_eq!(service.last_error(), Some(AuthError::NetworkError));
    assert!(service.session().is_none());
    assert!(!service.is_authenticated());
}

// --- profile updates -----------------------------------------------------

#[tokio::test]
async fn test_successive_partial_profile_updates_compose() {
    let (service, identity, _, directory) = harness();
    identity.queue_google(Ok(principal("g1")));
    service.sign_in_with_google().await.unwrap();

    service
        .update_profile(ProfileUpdate::default().with_display_name("Jane"))
        .await
        .unwrap();
    service
        .update_profile(ProfileUpdate::default().with_photo_url("https://img.example.com/j.png"))
        .await
        .unwrap();

    let session = service.session().unwrap();
    assert_eq!(session.display_name.as_deref(), Some("Jane"));
    assert_eq!(
        session.photo_url.as_deref(),
        Some("https://img.example.com/j.png")
    );

    let record = directory.record("g1").await.unwrap();
    assert_eq!(record.display_name.as_deref(), Some("Jane"));
    assert_eq!(
        record.photo_url.as_deref(),
        Some("https://img.example.com/j.png")
    );
}

#[tokio::test]
async fn test_profile_update_without_session_is_a_noop() {
    let (service, _, _, directory) = harness();

    service
        .update_profile(ProfileUpdate::default().with_display_name("Jane"))
        .await
        .unwrap();

    assert!(service.last_error().is_none());
    assert!(directory.is_empty().await);
}

// --- provider principal changes ------------------------------------------

#[tokio::test]
async fn test_principal_listener_mirrors_provider_changes() {
    let (service, identity, _, _) = harness();
    let listener = service.spawn_principal_listener();
    let mut sessions = service.subscribe_session();

    identity.emit_principal(Some(principal("ext1")));
    sessions.wait_for(|s| s.is_some()).await.unwrap();
    assert_eq!(service.session().unwrap().provider_uid, "ext1");
    assert!(service.is_authenticated());

    identity.emit_principal(None);
    sessions.wait_for(|s| s.is_none()).await.unwrap();
    assert!(!service.is_authenticated());

    listener.abort();
}
