use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{health, players, predict};
use matchodds::PlayerCatalog;

/// Default ratings file location
const DEFAULT_DATA_PATH: &str = "data/player_elo_ratings.csv";

/// Application state shared across handlers
pub struct AppState {
    pub catalog: PlayerCatalog,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let data_path =
        std::env::var("DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

    info!("Loading player ratings from {}", data_path);

    // A failed load is reported once; the server then runs with an empty
    // catalog instead of exiting.
    let catalog = match PlayerCatalog::load(&data_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(
                "Failed to load player ratings: {}. Serving an empty catalog.",
                e
            );
            PlayerCatalog::empty()
        }
    };

    let app_state = Arc::new(AppState { catalog });

    info!("Starting Matchodds API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/players/search", web::get().to(players::search_players))
            .route("/predict", web::post().to(predict::predict_match))
    })
    .bind(&addr)?
    .run()
    .await
}
