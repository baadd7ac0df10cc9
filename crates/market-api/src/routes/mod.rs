//! Route definitions
//!
//! All API routes mounted under /api, grouped by the guard chain they
//! sit behind. `route_layer` calls stack bottom-up, so each group lists
//! its innermost guard first and `authenticate` last.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{account, admin, auth, health};
use crate::middleware::{
    authenticate, require_admin, require_buyer, require_seller, require_verified,
};
use crate::state::AppState;

/// Create the main API router (health endpoints are mounted separately
/// so they bypass rate limiting)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api", api_routes(state))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes(state))
        .merge(account_routes(state))
        .merge(buyer_routes(state))
        .merge(seller_routes(state))
        .merge(admin_routes(state))
}

/// Authentication surface: public entry points plus the token-holder
/// routes (any authenticated account, verified or not)
fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify-email", post(auth::verify_email))
        .route(
            "/auth/resend-verification-email",
            post(auth::resend_verification),
        );

    let protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/profile", put(auth::update_profile))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    public.merge(protected)
}

/// Verified-account surface
fn account_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/account", get(account::get_account))
        .route_layer(from_fn(require_verified))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// Buyer-only surface
fn buyer_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/buyer/dashboard", get(account::buyer_dashboard))
        .route_layer(from_fn(require_buyer))
        .route_layer(from_fn(require_verified))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// Seller-only surface
fn seller_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/seller/dashboard", get(account::seller_dashboard))
        .route_layer(from_fn(require_seller))
        .route_layer(from_fn(require_verified))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// Administrative surface
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/admin/users/:user_id",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route(
            "/admin/users/:user_id/toggle-status",
            patch(admin::toggle_status),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}
