use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use resto_map::config::Settings;
use resto_map::core::{MapSession, RestaurantStore};
use resto_map::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use resto_map::services::{load_seed, PlacesClient};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Resto Map service...");

    // Seed the store
    let seed = load_seed(&settings.store.seed_path).unwrap_or_else(|e| {
        error!("Failed to load seed data from {}: {}", settings.store.seed_path, e);
        panic!("Seed data error: {}", e);
    });

    info!("Loaded {} restaurants from {}", seed.len(), settings.store.seed_path);

    let session = MapSession::new(RestaurantStore::from_seed(seed), settings.filter.star_range());

    // Initialize places client (optional - the map works from local data without it)
    let places = match PlacesClient::from_settings(&settings.places) {
        Ok(Some(client)) => {
            info!("Places lookup enabled ({})", settings.places.endpoint);
            Some(client)
        }
        Ok(None) => {
            warn!("No places API key configured, nearby search and geocoding disabled");
            None
        }
        Err(e) => {
            error!("Failed to create places client ({}), lookups disabled", e);
            None
        }
    };

    let app_state = AppState::new(session, places);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
