//! User lookup endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;

/// User search query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersQuery {
    pub q: String,
    /// Optional team name; hits are annotated with membership in it
    #[serde(default)]
    pub team: Option<String>,
}

/// A user search hit
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub name: String,
    pub fullname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<bool>,
}

/// User search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// GET /api/v1/users/search
pub async fn search_users(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Query(query): Query<SearchUsersQuery>,
) -> Result<Json<SearchUsersResponse>, ApiError> {
    debug!(q = %query.q, actor = %actor.name(), "Searching users");

    let team_id = match &query.team {
        Some(name) => Some(state.teams.find_by_name(name).await?.id()),
        None => None,
    };

    let matches = state.users.search(&query.q, team_id).await?;

    let users: Vec<UserResponse> = matches
        .iter()
        .map(|hit| UserResponse {
            name: hit.user.name().to_string(),
            fullname: hit.user.fullname().to_string(),
            member: hit.member,
        })
        .collect();
    let total = users.len();

    Ok(Json(SearchUsersResponse { users, total }))
}
