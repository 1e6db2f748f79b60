mod common;

use common::{build_test_app, register_user};
use sounddrops::errors::InternalError;

#[tokio::test]
async fn invited_email_registers_as_approved_creator() {
    let test = build_test_app().await;

    let admin = register_user(&test, "admin@sounddrops.com", "Admin").await;
    test.app
        .invitation_store
        .invite("star@example.com", &admin.id)
        .await
        .unwrap();

    let user = register_user(&test, "star@example.com", "Star").await;
    assert_eq!(user.role, "creator");
    assert!(user.creator_approved);

    // The invitation is spent by the registration
    let pending = test
        .app
        .invitation_store
        .find_pending("star@example.com")
        .await
        .unwrap();
    assert!(pending.is_none());

    let all = test.app.invitation_store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, "consumed");
}

#[tokio::test]
async fn invitation_consumes_exactly_once() {
    let test = build_test_app().await;

    let admin = register_user(&test, "admin@sounddrops.com", "Admin").await;
    test.app
        .invitation_store
        .invite("once@example.com", &admin.id)
        .await
        .unwrap();

    let first = test
        .app
        .invitation_store
        .consume("once@example.com")
        .await
        .unwrap();
    let second = test
        .app
        .invitation_store
        .consume("once@example.com")
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
}

#[tokio::test]
async fn duplicate_invitation_is_rejected() {
    let test = build_test_app().await;

    let admin = register_user(&test, "admin@sounddrops.com", "Admin").await;
    test.app
        .invitation_store
        .invite("dup@example.com", &admin.id)
        .await
        .unwrap();

    let err = test
        .app
        .invitation_store
        .invite("dup@example.com", &admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::DuplicateInvitation(_)));
}

#[tokio::test]
async fn uninvited_registration_lands_on_plain_user() {
    let test = build_test_app().await;

    let user = register_user(&test, "plain@example.com", "Plain").await;
    assert_eq!(user.role, "user");
    assert!(!user.creator_approved);
}

#[tokio::test]
async fn configured_admin_email_registers_as_admin() {
    let test = build_test_app().await;

    let admin = register_user(&test, "admin@sounddrops.com", "Admin").await;
    assert_eq!(admin.role, "admin");
}

#[tokio::test]
async fn apply_then_approve_promotes_a_creator() {
    let test = build_test_app().await;

    let user = register_user(&test, "hopeful@example.com", "Hopeful").await;

    test.app
        .account_service
        .apply_for_creator(&user)
        .await
        .unwrap();

    let pending = test.app.user_store.list_pending_creators().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, user.id);

    test.app
        .account_service
        .approve_creator(&user.id)
        .await
        .unwrap();

    let approved = test
        .app
        .user_store
        .find_by_id(&user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.role, "creator");
    assert!(approved.creator_approved);

    // Approval is idempotent
    test.app
        .account_service
        .approve_creator(&user.id)
        .await
        .unwrap();
    let again = test
        .app
        .user_store
        .find_by_id(&user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(again.creator_approved);
}

#[tokio::test]
async fn repeat_login_refreshes_profile_without_duplicating_the_user() {
    let test = build_test_app().await;

    register_user(&test, "repeat@example.com", "Old Name").await;
    let updated = register_user(&test, "repeat@example.com", "New Name").await;

    assert_eq!(updated.name, "New Name");
    assert_eq!(test.app.user_store.count_users().await.unwrap(), 1);
}
