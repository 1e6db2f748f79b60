mod common;

use common::{build_test_app, register_user};
use sounddrops::errors::InternalError;

#[tokio::test]
async fn session_token_round_trips_to_the_user() {
    let test = build_test_app().await;

    let user = register_user(&test, "someone@example.com", "Someone").await;
    let (token, expires_in) = test
        .app
        .session_service
        .create_session(&user.id)
        .await
        .unwrap();

    assert_eq!(expires_in, 7 * 24 * 60 * 60);

    let current = test.app.session_service.authenticate(&token).await.unwrap();
    assert_eq!(current.id(), user.id);
    assert_eq!(current.user.email, "someone@example.com");
}

#[tokio::test]
async fn unknown_token_is_an_invalid_session() {
    let test = build_test_app().await;

    let err = test
        .app
        .session_service
        .authenticate("not-a-token")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::InvalidSession));
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let test = build_test_app().await;

    let user = register_user(&test, "someone@example.com", "Someone").await;
    let (token, _) = test
        .app
        .session_service
        .create_session(&user.id)
        .await
        .unwrap();

    test.app.session_service.logout(&token).await.unwrap();

    let err = test
        .app
        .session_service
        .authenticate(&token)
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::InvalidSession));

    // Logging out again is harmless
    test.app.session_service.logout(&token).await.unwrap();
}
