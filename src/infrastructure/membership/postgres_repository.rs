//! PostgreSQL membership repository implementation
//!
//! The memberships table carries a uniqueness constraint on
//! (user_id, team_id); a violated insert surfaces as
//! `DuplicateMembership` so concurrent joins stay detectable instead of
//! producing a second row.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of MembershipRepository
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn exists(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM memberships WHERE user_id = $1 AND team_id = $2)",
        )
        .bind(user_id.as_uuid())
        .bind(team_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check membership: {}", e)))?;

        Ok(exists)
    }

    async fn add(&self, membership: Membership) -> Result<Membership, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (user_id, team_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(membership.user_id().as_uuid())
        .bind(membership.team_id().as_uuid())
        .bind(membership.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::duplicate_membership("This user is already in this team")
            } else {
                DomainError::storage(format!("Failed to add membership: {}", e))
            }
        })?;

        Ok(membership)
    }

    async fn remove(&self, user_id: UserId, team_id: TeamId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND team_id = $2")
            .bind(user_id.as_uuid())
            .bind(team_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to remove membership: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("No such membership"));
        }

        Ok(())
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Membership>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, team_id, created_at
            FROM memberships
            WHERE team_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(team_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        Ok(rows.iter().map(row_to_membership).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, team_id, created_at
            FROM memberships
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        Ok(rows.iter().map(row_to_membership).collect())
    }

    async fn count_by_team(&self, team_id: TeamId) -> Result<i64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE team_id = $1")
                .bind(team_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to count memberships: {}", e))
                })?;

        Ok(count)
    }

    async fn remove_by_team(&self, team_id: TeamId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM memberships WHERE team_id = $1")
            .bind(team_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to remove team memberships: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}

fn row_to_membership(row: &sqlx::postgres::PgRow) -> Membership {
    let user_id: Uuid = row.get("user_id");
    let team_id: Uuid = row.get("team_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Membership::from_parts(
        UserId::from_uuid(user_id),
        TeamId::from_uuid(team_id),
        created_at,
    )
}
