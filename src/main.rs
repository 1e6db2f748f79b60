use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use sounddrops::api::{
    AdminApi, AuthApi, BillingApi, CreatorApi, HealthApi, LibraryApi, SamplesApi,
};
use sounddrops::app_data::AppData;
use sounddrops::config::{init_logging, Settings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Invalid configuration");

    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", settings.database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let bind_addr = settings.bind_addr.clone();
    let app_data = Arc::new(AppData::init(settings, db));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            SamplesApi::new(app_data.clone()),
            BillingApi::new(app_data.clone()),
            LibraryApi::new(app_data.clone()),
            CreatorApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
        ),
        "SoundDrops API",
        "1.0.0",
    )
    .server(format!("http://{}/api", bind_addr));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", bind_addr);
    tracing::info!("Swagger UI available at /swagger");

    Server::new(TcpListener::bind(bind_addr)).run(app).await
}
