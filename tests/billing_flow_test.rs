mod common;

use common::{build_test_app, register_user, seed_pack};
use sounddrops::errors::InternalError;

#[tokio::test]
async fn duplicate_webhook_delivery_grants_one_purchase() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 999).await;

    let session = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap();

    test.gateway.set_paid(&session.session_id);
    let (body, signature) = test.gateway.webhook_payload(&session.session_id, "paid");

    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();
    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();

    let purchases = test.app.purchase_store.list_all().await.unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].amount_cents, 999);
    assert!(test
        .app
        .purchase_store
        .exists_for(&buyer.id, &pack.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn status_poll_settles_a_paid_checkout() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 1200).await;

    let session = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap();

    // Still pending; no grant yet
    let status = test
        .app
        .checkout_service
        .reconcile(&session.session_id)
        .await
        .unwrap();
    assert_eq!(status.payment_status, "pending");
    assert!(!test
        .app
        .purchase_store
        .exists_for(&buyer.id, &pack.id)
        .await
        .unwrap());

    test.gateway.set_paid(&session.session_id);
    let status = test
        .app
        .checkout_service
        .reconcile(&session.session_id)
        .await
        .unwrap();
    assert_eq!(status.payment_status, "paid");

    // A second poll after settlement does not double-grant
    test.app
        .checkout_service
        .reconcile(&session.session_id)
        .await
        .unwrap();

    let purchases = test.app.purchase_store.list_all().await.unwrap();
    assert_eq!(purchases.len(), 1);
}

#[tokio::test]
async fn free_packs_cannot_be_checked_out() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 0).await;

    let err = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::Validation(_)));
}

#[tokio::test]
async fn subscription_checkout_activates_once() {
    let test = build_test_app().await;

    let user = register_user(&test, "sub@example.com", "Subscriber").await;

    let session = test
        .app
        .checkout_service
        .create_subscription_checkout(&user.id, "http://app.invalid")
        .await
        .unwrap();

    test.gateway.set_paid(&session.session_id);
    let (body, signature) = test.gateway.webhook_payload(&session.session_id, "paid");
    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();
    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();

    assert!(test
        .app
        .subscription_store
        .is_active(&user.id)
        .await
        .unwrap());
    assert_eq!(test.app.subscription_store.count_active().await.unwrap(), 1);

    // A second checkout while active is a conflict
    let err = test
        .app
        .checkout_service
        .create_subscription_checkout(&user.id, "http://app.invalid")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::AlreadySubscribed));
}

#[tokio::test]
async fn settlement_interrupted_before_status_flip_completes_on_retry() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 999).await;

    let session = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap();
    test.gateway.set_paid(&session.session_id);

    // A prior delivery got as far as the grant insert and died before the
    // checkout row flipped to paid
    test.app
        .purchase_store
        .record(&buyer.id, &pack.id, 999, &session.session_id)
        .await
        .unwrap();
    let row = test
        .app
        .checkout_store
        .find_by_session_id(&session.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.payment_status, "pending");

    // Redelivery finishes the flip without granting twice
    let (body, signature) = test.gateway.webhook_payload(&session.session_id, "paid");
    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();

    let row = test
        .app
        .checkout_store
        .find_by_session_id(&session.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.payment_status, "paid");
    assert_eq!(test.app.purchase_store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_paid_webhook_events_are_ignored() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 800).await;

    let session = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap();

    let (body, signature) = test.gateway.webhook_payload(&session.session_id, "failed");
    test.app
        .checkout_service
        .handle_webhook(&body, &signature)
        .await
        .unwrap();

    assert!(!test
        .app
        .purchase_store
        .exists_for(&buyer.id, &pack.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn webhook_with_bad_signature_is_rejected() {
    let test = build_test_app().await;

    let err = test
        .app
        .checkout_service
        .handle_webhook(b"{}", "bad")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::WebhookSignature));
}

#[tokio::test]
async fn unknown_checkout_poll_is_not_found() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 800).await;

    // Seed one real session so the gateway knows a different id
    let session = test
        .app
        .checkout_service
        .create_pack_checkout(&buyer.id, &pack.id, "http://app.invalid")
        .await
        .unwrap();
    assert_ne!(session.session_id, "cs_missing");

    let err = test
        .app
        .checkout_service
        .reconcile("cs_missing")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::Gateway(_)));
}
