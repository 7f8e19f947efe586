mod api;
mod auth;
mod config;
mod db;
mod feed;
mod hashtag;
mod mention;
mod state;

use anyhow::Context;
use auth::IdentityClient;
use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perch_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::Settings::new().context("Failed to load settings")?;

    let db = db::Database::new(&settings.database.path).context("Failed to create database")?;
    db.initialize().context("Failed to initialize database schema")?;
    if settings.database.seed_demo {
        db.seed_demo_data().context("Failed to seed demo data")?;
        tracing::info!("Demo data seeded");
    }
    tracing::info!("Database initialized at {}", settings.database.path);

    let identity = IdentityClient::new(settings.identity.base_url.clone());
    let state = AppState::new(db, identity);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Feed + search + statistics
        .route("/feed", get(api::feed::get_feed))
        .route("/posts/search", get(api::feed::search_posts))
        .route("/statistics", get(api::feed::get_statistics))
        .route("/admin/posts", get(api::feed::get_admin_posts))
        .route("/hashtags/trending", get(api::feed::get_trending_hashtags))
        // Post routes
        .route("/posts", post(api::posts::create_post))
        .route(
            "/posts/:id",
            get(api::posts::get_post)
                .put(api::posts::update_post)
                .delete(api::posts::delete_post),
        )
        .route(
            "/posts/:id/repost",
            post(api::posts::create_repost).delete(api::posts::delete_repost),
        )
        .route(
            "/posts/:id/like",
            post(api::posts::create_like).delete(api::posts::delete_like),
        )
        .route(
            "/posts/:id/favorite",
            post(api::posts::create_favorite).delete(api::posts::delete_favorite),
        )
        // Profile routes
        .route("/users", post(api::social::create_user))
        .route("/users/:id/posts", get(api::feed::get_profile_posts))
        .route("/users/:id/favorites", get(api::feed::get_user_favorites))
        .route(
            "/users/:id/follow",
            post(api::social::follow_user).delete(api::social::unfollow_user),
        )
        // Social routes
        .route("/social/following", get(api::social::get_following))
        .route("/social/followers", get(api::social::get_followers))
        .route(
            "/interests",
            get(api::social::get_interests).put(api::social::set_interests),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Failed to parse server address")?;
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
