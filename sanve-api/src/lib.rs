use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod bookings;
pub mod error;
pub mod middleware;
pub mod settings;
pub mod spa;
pub mod state;
pub mod token;

pub use state::{AppState, AuthConfig};

pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    // CORS Middleware: explicit front-end allow-list, credentials supported.
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(600));

    let public = Router::new()
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/history-booking", get(bookings::booking_history))
        .route("/api/admin/login", post(admin::login))
        .route("/api/config", get(settings::get_pricing))
        .route("/api/bank-info", get(settings::get_bank_info));

    let admin = Router::new()
        .route("/api/admin/check-auth", get(admin::check_auth))
        .route("/api/admin/config", put(settings::update_pricing))
        .route("/api/admin/bank-info", put(settings::update_bank_info))
        .route(
            "/api/admin/smtp-config",
            get(settings::get_smtp).put(settings::update_smtp),
        )
        .route(
            "/api/admin/change-credentials",
            put(admin::change_credentials),
        )
        .route("/api/admin/history-booking", get(bookings::admin_history))
        .route(
            "/api/admin/history-booking/{id}",
            put(bookings::update_booking_status).delete(bookings::delete_booking),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .route("/admin/login", get(spa::admin_portal))
        .fallback_service(spa::static_service(&state.site.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
