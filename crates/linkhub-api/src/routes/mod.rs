//! Route definitions
//!
//! All API routes organized by area and mounted under /api.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, health, links, profile, public};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(link_routes())
        .merge(profile_routes())
        .merge(public_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/auth/providers", get(auth::providers))
}

/// Link routes
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(links::list_links).post(links::create_link))
        .route("/links/reorder", put(links::reorder_links))
        .route(
            "/links/:id",
            put(links::update_link).delete(links::delete_link),
        )
}

/// Profile, theme and account routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/theme", get(profile::get_theme).put(profile::update_theme))
        .route("/account", delete(profile::delete_account))
}

/// Unauthenticated routes
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/public/:username", get(public::public_page))
        .route("/views/:username", post(public::record_view))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/admin/users/:id",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/admin/stats", get(admin::stats))
}
