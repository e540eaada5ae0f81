//! Trusted-header identity extractors
//!
//! Authentication happens upstream; the proxy forwards the verified
//! identity as `x-user-id`, `x-user-name` and `x-user-admin` headers.
//! `CurrentUser` rejects anonymous requests, `MaybeUser` admits them.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::api::types::ApiError;
use crate::domain::auth::Actor;
use crate::domain::user::UserId;

const USER_ID_HEADER: &str = "x-user-id";
const USER_NAME_HEADER: &str = "x-user-name";
const USER_ADMIN_HEADER: &str = "x-user-admin";

/// Extractor requiring an authenticated identity
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match actor_from_headers(&parts.headers)? {
            Some(actor) => Ok(CurrentUser(actor)),
            None => Err(ApiError::unauthorized("Authentication required")),
        }
    }
}

/// Extractor admitting anonymous requests
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Actor>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(actor_from_headers(&parts.headers)?))
    }
}

/// Decode the identity headers. A missing id header means anonymous;
/// a present but malformed one is rejected.
fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, ApiError> {
    let Some(id_header) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let id_str = id_header
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid x-user-id header encoding"))?;
    let user_id = UserId::parse(id_str)
        .map_err(|_| ApiError::bad_request("Invalid x-user-id header value"))?;

    let name = headers
        .get(USER_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing x-user-name header"))?;

    let admin = headers
        .get(USER_ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1");

    Ok(Some(Actor::new(user_id, name, admin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn headers(id: &str, name: &str, admin: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, id.parse().unwrap());
        headers.insert(USER_NAME_HEADER, name.parse().unwrap());

        if let Some(admin) = admin {
            headers.insert(USER_ADMIN_HEADER, admin.parse().unwrap());
        }

        headers
    }

    #[test]
    fn test_decodes_identity() {
        let id = UserId::generate();
        let actor = actor_from_headers(&headers(&id.to_string(), "jane", None))
            .unwrap()
            .unwrap();

        assert_eq!(actor.user_id(), id);
        assert_eq!(actor.name(), "jane");
        assert!(!actor.is_admin());
    }

    #[test]
    fn test_admin_flag_variants() {
        let id = UserId::generate().to_string();

        for value in ["true", "TRUE", "1"] {
            let actor = actor_from_headers(&headers(&id, "root", Some(value)))
                .unwrap()
                .unwrap();
            assert!(actor.is_admin(), "{value} should mean admin");
        }

        let actor = actor_from_headers(&headers(&id, "jane", Some("false")))
            .unwrap()
            .unwrap();
        assert!(!actor.is_admin());
    }

    #[test]
    fn test_missing_id_is_anonymous() {
        assert!(actor_from_headers(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        let result = actor_from_headers(&headers("not-a-uuid", "jane", None));

        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_id_without_name_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, UserId::generate().to_string().parse().unwrap());

        assert!(actor_from_headers(&headers).is_err());
    }
}
