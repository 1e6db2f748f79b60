mod common;

use std::sync::Arc;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Route;
use poem_openapi::OpenApiService;

use common::{build_test_app, build_test_app_with_settings, register_user, seed_pack, test_settings, TestApp};
use sounddrops::api::{
    AdminApi, AuthApi, BillingApi, CreatorApi, HealthApi, LibraryApi, SamplesApi,
};
use sounddrops::app_data::AppData;

fn api_route(app: &Arc<AppData>) -> Route {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app.clone()),
            SamplesApi::new(app.clone()),
            BillingApi::new(app.clone()),
            LibraryApi::new(app.clone()),
            CreatorApi::new(app.clone()),
            AdminApi::new(app.clone()),
        ),
        "SoundDrops API",
        "1.0.0",
    );
    Route::new().nest("/api", api_service)
}

async fn session_token(test: &TestApp, user_id: &str) -> String {
    let (token, _) = test
        .app
        .session_service
        .create_session(user_id)
        .await
        .expect("session");
    token
}

#[tokio::test]
async fn subscription_status_reports_active_with_expiry() {
    let test = build_test_app().await;
    let user = register_user(&test, "sub@example.com", "Subscriber").await;

    let expires = chrono::Utc::now().timestamp() + 3600;
    test.app
        .subscription_store
        .activate(&user.id, "cs_sub_http", expires)
        .await
        .unwrap();

    let token = session_token(&test, &user.id).await;
    let cli = TestClient::new(api_route(&test.app));

    let resp = cli
        .get("/api/subscribe/status")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let obj = json.value().object();
    assert!(obj.get("active").bool());
    assert_eq!(obj.get("expires_at").i64(), expires);
}

#[tokio::test]
async fn subscription_status_requires_a_session() {
    let test = build_test_app().await;
    let cli = TestClient::new(api_route(&test.app));

    let resp = cli.get("/api/subscribe/status").send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_free_download_follows_the_login_policy() {
    // Policy on: even free packs require a session
    let test = build_test_app().await;
    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let pack = seed_pack(&test, &creator, 0).await;

    let cli = TestClient::new(api_route(&test.app));
    let resp = cli
        .get(format!("/api/samples/{}/download", pack.id))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    // Policy off: anonymous free downloads go through
    let mut settings = test_settings();
    settings.require_login_for_free_downloads = false;
    let open = build_test_app_with_settings(settings).await;
    let creator = register_user(&open, "creator@example.com", "Creator").await;
    let pack = seed_pack(&open, &creator, 0).await;

    let cli = TestClient::new(api_route(&open.app));
    let resp = cli
        .get(format!("/api/samples/{}/download", pack.id))
        .send()
        .await;
    resp.assert_status_is_ok();

    let refreshed = open.app.pack_store.get(&pack.id).await.unwrap();
    assert_eq!(refreshed.download_count, 1);
}

#[tokio::test]
async fn anonymous_paid_download_is_unauthorized_even_with_policy_off() {
    let mut settings = test_settings();
    settings.require_login_for_free_downloads = false;
    let test = build_test_app_with_settings(settings).await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let pack = seed_pack(&test, &creator, 900).await;

    let cli = TestClient::new(api_route(&test.app));
    let resp = cli
        .get(format!("/api/samples/{}/download", pack.id))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn purchaser_downloads_their_pack_over_http() {
    let test = build_test_app().await;

    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let buyer = register_user(&test, "buyer@example.com", "Buyer").await;
    let pack = seed_pack(&test, &creator, 900).await;
    let other = seed_pack(&test, &creator, 700).await;

    test.app
        .purchase_store
        .record(&buyer.id, &pack.id, 900, "cs_http_seed")
        .await
        .unwrap();

    let token = session_token(&test, &buyer.id).await;
    let cli = TestClient::new(api_route(&test.app));

    let resp = cli
        .get(format!("/api/samples/{}/download", pack.id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = cli
        .get(format!("/api/samples/{}/download", other.id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected_on_download() {
    let test = build_test_app().await;
    let creator = register_user(&test, "creator@example.com", "Creator").await;
    let pack = seed_pack(&test, &creator, 0).await;

    let cli = TestClient::new(api_route(&test.app));
    let resp = cli
        .get(format!("/api/samples/{}/download", pack.id))
        .header("Authorization", "Bearer bogus")
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}
