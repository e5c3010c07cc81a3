use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sortmyhostel_api::{
    config::Config, middleware::auth::JwtSecret, routes, services::metrics, store, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let data = store::load_or_init(Path::new(&config.state_path)).await?;
    info!(
        "State snapshot loaded from {} ({} menu items, {} votes)",
        config.state_path,
        data.menu.item_count(),
        data.ledger.total_votes()
    );

    let state = AppState::new(config.clone(), data);
    metrics::start(state.clone());

    // CORS: the configured frontend origin, plus localhost for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let origin = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if origin.starts_with("http://localhost") || origin.starts_with("http://127.0.0.1") {
            return true;
        }
        origin == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-user-id"),
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/auth/admin/login", post(routes::auth::admin_login))
        // Menu
        .route("/menu/all-days", get(routes::menu::get_all_days))
        .route("/menu/day/{day}", get(routes::menu::get_day))
        .route("/menu/upload", post(routes::menu::upload_menu))
        .route("/menu/add-item", post(routes::menu::add_item))
        .route("/menu/remove-item", delete(routes::menu::remove_item))
        .route("/menu/remove-all", delete(routes::menu::remove_all))
        // Feedback
        .route("/feedback/submit", post(routes::feedback::submit_vote))
        .route("/feedback/comment", post(routes::feedback::submit_comment))
        .route("/feedback/comment/{id}", delete(routes::feedback::delete_comment))
        .route("/feedback/disliked-issues", get(routes::feedback::disliked_issues))
        .route("/feedback/all-comments", get(routes::feedback::all_comments))
        // Analytics & wastage
        .route("/analytics", get(routes::analytics::get_analytics))
        .route("/wastage", get(routes::wastage::get_wastage))
        .route("/wastage/yesterday", get(routes::wastage::get_yesterday))
        .route("/wastage/submit", post(routes::wastage::submit_wastage))
        // Observability
        .route("/metrics", get(routes::metrics::metrics_handler))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Menu sheets are small; 10 MB is generous
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("sortmyhostel API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
