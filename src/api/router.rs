use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::teams;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/search", get(teams::search_teams))
        .route("/teams/join", post(teams::accept_invitation))
        .route(
            "/teams/{name}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/teams/{name}/members",
            get(teams::list_members).post(teams::add_member),
        )
        .route(
            "/teams/{name}/members/{username}",
            axum::routing::delete(teams::remove_member),
        )
        .route("/users/search", get(users::search_users));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", v1)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
