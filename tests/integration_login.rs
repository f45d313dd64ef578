//! Login flow and lockout behavior over the in-memory store.

mod common;

use chrono::Duration;
use common::{EMAIL, PASSWORD, register_user, test_state};
use flashdeck::store::LoginAttemptStore;
use flashdeck_auth::TokenKind;
use flashdeck_core::AuthError;

#[tokio::test]
async fn test_successful_login_returns_session_token() {
    let (state, _store, _clock) = test_state();
    let user = register_user(&state).await;

    let token = state.login.login(EMAIL, PASSWORD).await.unwrap();
    let claims = state.codec.verify(&token, TokenKind::Auth).unwrap();
    assert_eq!(claims.sub, EMAIL);
    assert_eq!(claims.user_id, user.id);
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let (state, _store, _clock) = test_state();
    register_user(&state).await;

    assert!(state.login.login("User@Example.COM", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_unknown_email_and_invalid_email() {
    let (state, _store, _clock) = test_state();

    assert_eq!(
        state.login.login("nobody@example.com", PASSWORD).await,
        Err(AuthError::UserNotFound)
    );
    assert!(matches!(
        state.login.login("not-an-email", PASSWORD).await,
        Err(AuthError::EmailInvalid(_))
    ));
}

#[tokio::test]
async fn test_four_failures_do_not_lock_the_account() {
    let (state, store, _clock) = test_state();
    let user = register_user(&state).await;

    for _ in 0..4 {
        assert_eq!(
            state.login.login(EMAIL, "Wrong1Password").await,
            Err(AuthError::IncorrectPassword)
        );
    }

    let attempt = store.get_or_create(user.id, state.clock.now()).await.unwrap();
    assert_eq!(attempt.attempt_count, 4);
    assert!(!attempt.is_locked());

    // Still able to log in.
    assert!(state.login.login(EMAIL, PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_fifth_failure_locks_even_against_correct_password() {
    let (state, _store, _clock) = test_state();
    register_user(&state).await;

    for _ in 0..5 {
        assert_eq!(
            state.login.login(EMAIL, "Wrong1Password").await,
            Err(AuthError::IncorrectPassword)
        );
    }

    // The correct password is not even checked once locked.
    assert_eq!(
        state.login.login(EMAIL, PASSWORD).await,
        Err(AuthError::AccountLocked { minutes: 15 })
    );
}

#[tokio::test]
async fn test_lockout_message_reports_the_fixed_window() {
    let (state, _store, clock) = test_state();
    register_user(&state).await;

    for _ in 0..5 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }

    // The reported duration is the configured window, not the time left.
    clock.advance(Duration::minutes(10));
    assert_eq!(
        state.login.login(EMAIL, PASSWORD).await,
        Err(AuthError::AccountLocked { minutes: 15 })
    );
}

#[tokio::test]
async fn test_lockout_expires_after_the_window() {
    let (state, store, clock) = test_state();
    let user = register_user(&state).await;

    for _ in 0..5 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }

    // The boundary instant is still inside the window.
    clock.advance(Duration::minutes(15));
    assert_eq!(
        state.login.login(EMAIL, PASSWORD).await,
        Err(AuthError::AccountLocked { minutes: 15 })
    );

    clock.advance(Duration::minutes(1));
    assert!(state.login.login(EMAIL, PASSWORD).await.is_ok());

    let attempt = store.get_or_create(user.id, clock.now()).await.unwrap();
    assert_eq!(attempt.attempt_count, 0);
    assert!(!attempt.is_locked());
}

#[tokio::test]
async fn test_clock_moving_backward_keeps_the_lock() {
    let (state, _store, clock) = test_state();
    register_user(&state).await;

    for _ in 0..5 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }

    clock.advance(Duration::hours(-2));
    assert!(matches!(
        state.login.login(EMAIL, PASSWORD).await,
        Err(AuthError::AccountLocked { .. })
    ));
}

#[tokio::test]
async fn test_successful_login_resets_the_counter() {
    let (state, store, clock) = test_state();
    let user = register_user(&state).await;

    for _ in 0..3 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }
    state.login.login(EMAIL, PASSWORD).await.unwrap();

    let attempt = store.get_or_create(user.id, clock.now()).await.unwrap();
    assert_eq!(attempt.attempt_count, 0);
}

#[tokio::test]
async fn test_diagnostic_reads_report_stored_state() {
    let (state, _store, clock) = test_state();
    let user = register_user(&state).await;

    assert_eq!(
        state.login_attempts.get_attempt_count(user.id).await.unwrap(),
        0
    );

    for _ in 0..2 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }
    assert_eq!(
        state.login_attempts.get_attempt_count(user.id).await.unwrap(),
        2
    );
    assert!(!state.login_attempts.is_locked(user.id).await.unwrap());

    for _ in 0..3 {
        let _ = state.login.login(EMAIL, "Wrong1Password").await;
    }
    assert!(state.login_attempts.is_locked(user.id).await.unwrap());

    // An elapsed lockout still reads as locked until a login lifts it.
    clock.advance(Duration::minutes(16));
    assert!(state.login_attempts.is_locked(user.id).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_failures_all_count() {
    let (state, store, clock) = test_state();
    let user = register_user(&state).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state.login_attempts.on_failed_login(user.id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let attempt = store.get_or_create(user.id, clock.now()).await.unwrap();
    assert_eq!(attempt.attempt_count, 10);
    assert!(attempt.is_locked());
}
