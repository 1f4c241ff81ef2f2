use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::Mutex;
use validator::Validate;
use crate::core::{MapEvent, MapSession, StoreError};
use crate::models::{
    AddRatingRequest, AddressResponse, ErrorResponse, GeoBound, HealthResponse, NearbyPlacesResponse,
    NewRestaurant, Position, ReverseGeocodeQuery, SelectionResponse, StarFilterRange, ViewportQuery,
};
use crate::services::PlacesClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<MapSession>>,
    pub places: Option<Arc<PlacesClient>>,
}

impl AppState {
    pub fn new(session: MapSession, places: Option<PlacesClient>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            places: places.map(Arc::new),
        }
    }
}

/// Configure all restaurant-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/restaurants", web::get().to(viewport_selection))
        .route("/restaurants", web::post().to(add_restaurant))
        .route("/restaurants/selection", web::get().to(current_selection))
        .route("/ratings", web::post().to(add_rating))
        .route("/filters/stars", web::get().to(get_star_range))
        .route("/filters/stars", web::put().to(set_star_range))
        .route("/session/position", web::put().to(set_user_position))
        .route("/places/nearby", web::post().to(nearby_places))
        .route("/geocode/reverse", web::get().to(reverse_geocode));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::Validation(errors) => {
            tracing::info!("Rejected submission: {}", errors);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: errors.to_string(),
                status_code: 400,
            })
        }
        StoreError::NotFound(target) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Restaurant not found".to_string(),
            message: format!("No restaurant matches {}", target),
            status_code: 404,
        }),
    }
}

fn places_disabled() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Places lookup disabled".to_string(),
        message: "No places API key is configured".to_string(),
        status_code: 503,
    })
}

/// Apply one event to the session and answer with the new selection
async fn dispatch(state: &AppState, event: MapEvent) -> Result<SelectionResponse, StoreError> {
    let mut session = state.session.lock().await;
    session.handle(event).map(SelectionResponse::from)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let restaurants = state.session.lock().await.store().len();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        restaurants,
        places_enabled: state.places.is_some(),
        timestamp: chrono::Utc::now(),
    })
}

/// Viewport changed
///
/// GET /api/v1/restaurants?swLat=48.80&swLng=2.25&neLat=48.90&neLng=2.42
async fn viewport_selection(
    state: web::Data<AppState>,
    query: web::Query<ViewportQuery>,
) -> impl Responder {
    let bound = GeoBound::from(query.into_inner());

    match dispatch(&state, MapEvent::ViewportChanged(bound)).await {
        Ok(selection) => {
            tracing::debug!("Returning {} restaurants for viewport", selection.total_results);
            HttpResponse::Ok().json(selection)
        }
        Err(e) => store_error_response(e),
    }
}

/// Selection for the last known viewport
async fn current_selection(state: web::Data<AppState>) -> impl Responder {
    let selection = state.session.lock().await.selection();
    HttpResponse::Ok().json(SelectionResponse::from(selection))
}

/// Add a restaurant picked on the map
///
/// POST /api/v1/restaurants
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "address": "string",
///   "lat": 48.85,
///   "lng": 2.35,
///   "ratings": [{ "stars": 4, "comment": "string" }]
/// }
/// ```
async fn add_restaurant(
    state: web::Data<AppState>,
    req: web::Json<NewRestaurant>,
) -> impl Responder {
    let restaurant = req.into_inner();
    tracing::info!("Adding restaurant {} at {}", restaurant.name, restaurant.address);

    match dispatch(&state, MapEvent::RestaurantAdded(restaurant)).await {
        Ok(selection) => HttpResponse::Created().json(selection),
        Err(e) => store_error_response(e),
    }
}

/// Rate a restaurant
///
/// POST /api/v1/ratings
///
/// Request body:
/// ```json
/// {
///   "target": "address or name",
///   "stars": 1-5,
///   "comment": "string"
/// }
/// ```
async fn add_rating(
    state: web::Data<AppState>,
    req: web::Json<AddRatingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let event = MapEvent::RatingSubmitted {
        target: req.target.clone(),
        rating: req.rating(),
    };

    match dispatch(&state, event).await {
        Ok(selection) => {
            tracing::info!("Recorded {} star rating for {}", req.stars, req.target);
            HttpResponse::Ok().json(selection)
        }
        Err(e) => store_error_response(e),
    }
}

async fn get_star_range(state: web::Data<AppState>) -> impl Responder {
    let range = state.session.lock().await.star_range();
    HttpResponse::Ok().json(range)
}

/// Change the star filter; an inverted range is accepted and selects nothing
async fn set_star_range(
    state: web::Data<AppState>,
    req: web::Json<StarFilterRange>,
) -> impl Responder {
    match dispatch(&state, MapEvent::StarRangeChanged(req.into_inner())).await {
        Ok(selection) => HttpResponse::Ok().json(selection),
        Err(e) => store_error_response(e),
    }
}

/// Geolocation update; a `null` body means the position is unavailable
async fn set_user_position(
    state: web::Data<AppState>,
    req: web::Json<Option<Position>>,
) -> impl Responder {
    match dispatch(&state, MapEvent::UserPositionChanged(req.into_inner())).await {
        Ok(selection) => HttpResponse::Ok().json(selection),
        Err(e) => store_error_response(e),
    }
}

/// Look up restaurants around a viewport and merge them into the store
///
/// POST /api/v1/places/nearby
///
/// Request body:
/// ```json
/// {
///   "southwest": { "lat": 48.80, "lng": 2.25 },
///   "northeast": { "lat": 48.90, "lng": 2.42 }
/// }
/// ```
async fn nearby_places(
    state: web::Data<AppState>,
    req: web::Json<GeoBound>,
) -> impl Responder {
    let Some(places) = state.places.clone() else {
        return places_disabled();
    };
    let bound = req.into_inner();

    // The provider is queried without holding the session lock
    let found = match places.nearby_search(&bound).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Nearby search failed: {}", e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Nearby search failed",
                e.to_string(),
            );
        }
    };
    let discovered = found.len();

    let mut session = state.session.lock().await;
    let before = session.store().len();

    let result = session
        .handle(MapEvent::ViewportChanged(bound))
        .and_then(|_| session.handle(MapEvent::PlacesDiscovered(found)));

    match result {
        Ok(selection) => {
            let added = session.store().len() - before;
            tracing::info!("Nearby search merged {} of {} places", added, discovered);
            HttpResponse::Ok().json(NearbyPlacesResponse {
                discovered,
                added,
                selection: SelectionResponse::from(selection),
            })
        }
        Err(e) => store_error_response(e),
    }
}

/// Resolve a clicked coordinate into an address
///
/// GET /api/v1/geocode/reverse?lat=48.85&lng=2.35
async fn reverse_geocode(
    state: web::Data<AppState>,
    query: web::Query<ReverseGeocodeQuery>,
) -> impl Responder {
    let Some(places) = state.places.clone() else {
        return places_disabled();
    };
    let position = Position::new(query.lat, query.lng);

    match places.reverse_geocode(position).await {
        Ok(address) => HttpResponse::Ok().json(AddressResponse { position, address }),
        Err(e) => {
            tracing::error!("Reverse geocoding failed for {},{}: {}", position.lat, position.lng, e);
            error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Reverse geocoding failed",
                e.to_string(),
            )
        }
    }
}
