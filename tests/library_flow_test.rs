mod common;

use common::{build_test_app, register_user, seed_pack};

#[tokio::test]
async fn favoriting_is_idempotent() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let user = register_user(&test, "fan@example.com", "Fan").await;
    let pack = seed_pack(&test, &creator, 500).await;

    let first = test.app.favorite_store.add(&user.id, &pack.id).await.unwrap();
    let second = test.app.favorite_store.add(&user.id, &pack.id).await.unwrap();
    assert!(first);
    assert!(!second);

    let pack_ids = test
        .app
        .favorite_store
        .list_pack_ids(&user.id)
        .await
        .unwrap();
    assert_eq!(pack_ids, vec![pack.id.clone()]);

    let packs = test.app.pack_store.find_by_ids(&pack_ids).await.unwrap();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].id, pack.id);
}

#[tokio::test]
async fn unfavoriting_removes_the_pack_and_tolerates_repeats() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let user = register_user(&test, "fan@example.com", "Fan").await;
    let pack = seed_pack(&test, &creator, 500).await;

    test.app.favorite_store.add(&user.id, &pack.id).await.unwrap();
    test.app
        .favorite_store
        .remove(&user.id, &pack.id)
        .await
        .unwrap();

    let pack_ids = test
        .app
        .favorite_store
        .list_pack_ids(&user.id)
        .await
        .unwrap();
    assert!(pack_ids.is_empty());

    // Removing an absent favorite is a no-op
    test.app
        .favorite_store
        .remove(&user.id, &pack.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn favorites_are_scoped_per_user() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let fan = register_user(&test, "fan@example.com", "Fan").await;
    let other = register_user(&test, "other@example.com", "Other").await;
    let pack = seed_pack(&test, &creator, 500).await;

    test.app.favorite_store.add(&fan.id, &pack.id).await.unwrap();

    assert!(test
        .app
        .favorite_store
        .list_pack_ids(&other.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn collection_membership_is_idempotent() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let user = register_user(&test, "curator@example.com", "Curator").await;
    let pack = seed_pack(&test, &creator, 500).await;

    let collection = test
        .app
        .collection_store
        .create(&user.id, "Cinematic", "Scoring material")
        .await
        .unwrap();

    test.app
        .collection_store
        .add_pack(&collection.id, &pack.id)
        .await
        .unwrap();
    test.app
        .collection_store
        .add_pack(&collection.id, &pack.id)
        .await
        .unwrap();

    let pack_ids = test
        .app
        .collection_store
        .list_pack_ids(&collection.id)
        .await
        .unwrap();
    assert_eq!(pack_ids, vec![pack.id.clone()]);

    test.app
        .collection_store
        .remove_pack(&collection.id, &pack.id)
        .await
        .unwrap();
    assert!(test
        .app
        .collection_store
        .list_pack_ids(&collection.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn collections_are_owned_by_their_creator() {
    let test = build_test_app().await;

    let owner = register_user(&test, "owner@example.com", "Owner").await;
    let intruder = register_user(&test, "intruder@example.com", "Intruder").await;

    let collection = test
        .app
        .collection_store
        .create(&owner.id, "Private", "")
        .await
        .unwrap();

    let as_owner = test
        .app
        .collection_store
        .find_owned(&collection.id, &owner.id)
        .await
        .unwrap();
    assert!(as_owner.is_some());

    let as_intruder = test
        .app
        .collection_store
        .find_owned(&collection.id, &intruder.id)
        .await
        .unwrap();
    assert!(as_intruder.is_none());
}

#[tokio::test]
async fn collections_list_per_user() {
    let test = build_test_app().await;

    let user = register_user(&test, "curator@example.com", "Curator").await;
    test.app
        .collection_store
        .create(&user.id, "Drums", "")
        .await
        .unwrap();
    test.app
        .collection_store
        .create(&user.id, "Vocals", "")
        .await
        .unwrap();

    let collections = test
        .app
        .collection_store
        .list_for_user(&user.id)
        .await
        .unwrap();
    assert_eq!(collections.len(), 2);
}
