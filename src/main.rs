//! Studio website backend
//!
//! Serves the public portfolio data and the session-based admin back office,
//! with SQLite persistence and local image storage.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod panel;
mod showcase;
mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionStore;
use config::Config;
use db::Repository;
use models::{CreateAdminUserRequest, Role};
use storage::{DiskObjectStore, ObjectStore};

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub storage: Arc<dyn ObjectStore>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting studio backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    bootstrap_admin(&repo, &config).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let storage = Arc::new(DiskObjectStore::new(
        config.upload_dir.clone(),
        &config.public_url,
    ));

    // Create application state
    let state = AppState {
        repo,
        storage,
        sessions: Arc::new(SessionStore::new(chrono::Duration::minutes(
            config.session_idle_minutes,
        ))),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the first super admin when the account table is empty.
async fn bootstrap_admin(repo: &Repository, config: &Config) -> Result<(), errors::AppError> {
    if repo.count_admin_users().await? > 0 {
        return Ok(());
    }

    match &config.bootstrap_admin {
        Some(seed) => {
            let user = repo
                .create_admin_user(&CreateAdminUserRequest {
                    username: seed.username.clone(),
                    password: seed.password.clone(),
                    role: Role::SuperAdmin,
                    permissions: Default::default(),
                    active: true,
                })
                .await?;
            tracing::info!(username = %user.username, "Created bootstrap super admin");
        }
        None => tracing::warn!(
            "No admin users exist and STUDIO_BOOTSTRAP_USERNAME/PASSWORD are unset. Nobody can log in!"
        ),
    }
    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public website routes
    let public_routes = Router::new()
        .route("/projects", get(api::list_public_projects))
        .route("/projects/{id}", get(api::get_public_project))
        .route("/team", get(api::list_public_team))
        .route("/testimonials", get(api::list_public_testimonials))
        .route("/settings", get(api::get_public_settings))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout));

    // Admin routes, all behind a session
    let admin_routes = Router::new()
        .route("/auth/me", get(api::current_operator))
        .route("/admin/panel", get(api::get_panel))
        .route("/admin/reload", post(api::reload_panel))
        // Projects
        .route(
            "/admin/projects/form",
            post(api::open_project_form)
                .put(api::update_project_form)
                .delete(api::cancel_project_form),
        )
        .route("/admin/projects/form/images", post(api::add_project_image))
        .route(
            "/admin/projects/form/images/{index}",
            delete(api::remove_project_image),
        )
        .route("/admin/projects/form/submit", post(api::submit_project))
        .route("/admin/projects/{id}/edit", post(api::edit_project))
        .route("/admin/projects/{id}", delete(api::delete_project))
        // Team
        .route(
            "/admin/team/form",
            post(api::open_team_member_form)
                .put(api::update_team_member_form)
                .delete(api::cancel_team_member_form),
        )
        .route("/admin/team/form/sort-order", put(api::set_team_sort_order))
        .route("/admin/team/form/submit", post(api::submit_team_member))
        .route("/admin/team/{id}/edit", post(api::edit_team_member))
        .route("/admin/team/{id}", delete(api::delete_team_member))
        // Testimonials
        .route(
            "/admin/testimonials/form",
            post(api::open_testimonial_form)
                .put(api::update_testimonial_form)
                .delete(api::cancel_testimonial_form),
        )
        .route(
            "/admin/testimonials/form/submit",
            post(api::submit_testimonial),
        )
        .route("/admin/testimonials/{id}/edit", post(api::edit_testimonial))
        .route("/admin/testimonials/{id}", delete(api::delete_testimonial))
        // Site settings
        .route("/admin/settings", patch(api::edit_setting))
        .route("/admin/settings/hero-slides", post(api::add_hero_slide))
        .route(
            "/admin/settings/hero-slides/{index}",
            patch(api::update_hero_slide).delete(api::remove_hero_slide),
        )
        .route("/admin/settings/save", post(api::save_site_settings))
        // Uploads
        .route(
            "/admin/uploads",
            post(api::upload_image).delete(api::delete_upload),
        )
        // Operator accounts
        .route(
            "/admin/users",
            get(api::list_admin_users).post(api::create_admin_user),
        )
        .route(
            "/admin/users/{id}",
            put(api::update_admin_user).delete(api::delete_admin_user),
        )
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_bytes + MULTIPART_OVERHEAD,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_auth_layer,
        ));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .nest_service(
            storage::UPLOADS_ROUTE,
            ServeDir::new(&state.config.upload_dir),
        )
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
