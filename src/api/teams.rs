//! Team and membership endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::team::Team;
use crate::infrastructure::membership::JoinOutcome;
use crate::infrastructure::team::{
    CreateTeamRequest, TeamScope, TeamSummary, UpdateTeamRequest,
};

const DEFAULT_PER_PAGE: usize = 20;

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}

/// Request to update a team
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamApiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
}

/// Team representation for API responses
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name().to_string(),
            description: team.description().to_string(),
            public: team.is_public(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// Team detail response with derived numbers
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummaryResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub member_count: i64,
    pub rank: usize,
    pub score: i64,
}

impl From<&TeamSummary> for TeamSummaryResponse {
    fn from(summary: &TeamSummary) -> Self {
        Self {
            team: TeamResponse::from(&summary.team),
            member_count: summary.member_count,
            rank: summary.rank,
            score: summary.score,
        }
    }
}

/// Paginated team listing response
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Listing query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ListTeamsQuery {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

/// Search query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTeamsQuery {
    pub q: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Body for POST /teams/{name}/members: empty means "join myself"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMemberApiRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// Body for POST /teams/join
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptInvitationApiRequest {
    pub token: String,
}

/// Outcome of a join/invite request
#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<JoinOutcome> for JoinResponse {
    fn from(outcome: JoinOutcome) -> Self {
        match outcome {
            JoinOutcome::Joined => Self {
                status: "joined",
                warning: None,
            },
            JoinOutcome::AlreadyMember => Self {
                status: "already_member",
                warning: None,
            },
            JoinOutcome::InvitationSent { warning } => Self {
                status: "invitation_sent",
                warning,
            },
        }
    }
}

/// A team member in a member-list response
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub name: String,
    pub fullname: String,
    pub score: i64,
}

/// Member list response
#[derive(Debug, Clone, Serialize)]
pub struct ListMembersResponse {
    pub members: Vec<MemberResponse>,
    pub total: usize,
}

fn parse_scope(scope: Option<&str>) -> Result<TeamScope, ApiError> {
    match scope {
        Some(s) => s.parse().map_err(ApiError::from),
        None => Ok(TeamScope::Public),
    }
}

/// GET /api/v1/teams
pub async fn list_teams(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let scope = parse_scope(query.scope.as_deref())?;
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);

    debug!(scope = %scope.as_str(), page, "Listing teams");

    let result = state
        .teams
        .list(actor.as_ref(), scope, page, per_page)
        .await?;

    Ok(Json(ListTeamsResponse {
        teams: result.teams.iter().map(TeamResponse::from).collect(),
        total: result.total,
        page: result.page,
        per_page: result.per_page,
    }))
}

/// POST /api/v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let team = state
        .teams
        .create(
            &actor,
            CreateTeamRequest {
                name: request.name,
                description: request.description,
                public: request.public,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /api/v1/teams/{name}
pub async fn get_team(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Path(name): Path<String>,
) -> Result<Json<TeamSummaryResponse>, ApiError> {
    let summary = state.teams.summary(actor.as_ref(), &name).await?;

    Ok(Json(TeamSummaryResponse::from(&summary)))
}

/// PUT /api/v1/teams/{name}
pub async fn update_team(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(name): Path<String>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state
        .teams
        .update(
            &actor,
            &name,
            UpdateTeamRequest {
                name: request.name,
                description: request.description,
                public: request.public,
            },
        )
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /api/v1/teams/{name}
pub async fn delete_team(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.teams.delete(&actor, &name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/teams/search
pub async fn search_teams(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Query(query): Query<SearchTeamsQuery>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let scope = parse_scope(query.scope.as_deref())?;

    debug!(q = %query.q, scope = %scope.as_str(), "Searching teams");

    let teams = state.teams.search(actor.as_ref(), &query.q, scope).await?;
    let total = teams.len();

    Ok(Json(ListTeamsResponse {
        teams: teams.iter().map(TeamResponse::from).collect(),
        total,
        page: 1,
        per_page: total.max(1),
    }))
}

/// GET /api/v1/teams/{name}/members
pub async fn list_members(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Path(name): Path<String>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let members = state.memberships.members(actor.as_ref(), &name).await?;

    let members: Vec<MemberResponse> = members
        .iter()
        .map(|user| MemberResponse {
            name: user.name().to_string(),
            fullname: user.fullname().to_string(),
            score: user.score(),
        })
        .collect();
    let total = members.len();

    Ok(Json(ListMembersResponse { members, total }))
}

/// POST /api/v1/teams/{name}/members
pub async fn add_member(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(name): Path<String>,
    body: Option<Json<AddMemberApiRequest>>,
) -> Result<Json<JoinResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let outcome = state
        .memberships
        .add_member(&actor, &name, request.username.as_deref())
        .await?;

    Ok(Json(JoinResponse::from(outcome)))
}

/// POST /api/v1/teams/join
pub async fn accept_invitation(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(request): Json<AcceptInvitationApiRequest>,
) -> Result<Json<JoinResponse>, ApiError> {
    let outcome = state
        .memberships
        .accept_invitation(&actor, &request.token)
        .await?;

    Ok(Json(JoinResponse::from(outcome)))
}

/// DELETE /api/v1/teams/{name}/members/{username}
pub async fn remove_member(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path((name, username)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    // Removing your own row is always phrased as a self-removal so the
    // owner check applies uniformly
    let target = if username == actor.name() {
        None
    } else {
        Some(username.as_str())
    };

    state.memberships.remove_member(&actor, &name, target).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_response_shapes() {
        let joined = JoinResponse::from(JoinOutcome::Joined);
        assert_eq!(joined.status, "joined");
        assert!(joined.warning.is_none());

        let invited = JoinResponse::from(JoinOutcome::InvitationSent {
            warning: Some("mail failed".to_string()),
        });
        assert_eq!(invited.status, "invitation_sent");

        let json = serde_json::to_string(&invited).unwrap();
        assert!(json.contains("mail failed"));

        let json = serde_json::to_string(&joined).unwrap();
        assert!(!json.contains("warning"));
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateTeamApiRequest =
            serde_json::from_str(r#"{"name": "Data Cleaners"}"#).unwrap();

        assert!(request.public);
        assert!(request.description.is_empty());
    }

    #[test]
    fn test_parse_scope_defaults_to_public() {
        assert_eq!(parse_scope(None).unwrap(), TeamScope::Public);
        assert_eq!(parse_scope(Some("mine")).unwrap(), TeamScope::Mine);
        assert!(parse_scope(Some("bogus")).is_err());
    }
}
