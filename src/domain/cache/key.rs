//! Cache key layout for team views
//!
//! Keys are scoped per team (summary, member count, member list, rank)
//! plus per-(scope, page, page size) listing keys. Writers invalidate
//! the affected keys synchronously before reporting success.

use crate::domain::team::TeamId;

/// Namespace prefix for all team view keys
const NS: &str = "teams";

/// Cached team detail page, keyed by unique name
pub fn team_summary(name: &str) -> String {
    format!("{NS}:summary:{name}")
}

/// Cached member count of a team
pub fn member_count(team_id: TeamId) -> String {
    format!("{NS}:members:count:{team_id}")
}

/// Cached member list of a team
pub fn member_list(team_id: TeamId) -> String {
    format!("{NS}:members:list:{team_id}")
}

/// Cached rank/score aggregate of a team
pub fn team_rank(team_id: TeamId) -> String {
    format!("{NS}:rank:{team_id}")
}

/// Cached listing page for a scope. The page size is part of the key;
/// the same page number under a different size is a different view.
pub fn listing(scope: &str, page: usize, per_page: usize) -> String {
    format!("{NS}:list:{scope}:{page}:{per_page}")
}

/// Pattern matching every listing page
pub fn listing_pattern() -> String {
    format!("{NS}:list:*")
}

/// Pattern matching every rank aggregate. Rank is relative, so any
/// membership change may shift other teams; writers drop them all.
pub fn rank_pattern() -> String {
    format!("{NS}:rank:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let id = TeamId::generate();

        assert_eq!(team_summary("alpha"), "teams:summary:alpha");
        assert_eq!(member_count(id), format!("teams:members:count:{id}"));
        assert_eq!(member_list(id), format!("teams:members:list:{id}"));
        assert_eq!(team_rank(id), format!("teams:rank:{id}"));
        assert_eq!(listing("public", 2, 20), "teams:list:public:2:20");
        assert_ne!(listing("public", 1, 1), listing("public", 1, 10));
    }

    #[test]
    fn test_patterns_cover_keys() {
        let regex = regex::Regex::new(&listing_pattern().replace('*', ".*")).unwrap();
        assert!(regex.is_match(&listing("all", 1, 10)));
        assert!(regex.is_match(&listing("mine", 7, 5)));
        assert!(!regex.is_match(&team_summary("alpha")));
    }
}
