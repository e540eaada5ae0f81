//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::team::{Team, TeamId, TeamQuery, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TEAM_COLUMNS: &str = "id, name, description, public, owner_id, created_at, updated_at";

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.map(|row| row_to_team(&row)).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team by name: {}", e)))?;

        row.map(|row| row_to_team(&row)).transpose()
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, description, public, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(team.id().as_uuid())
        .bind(team.name())
        .bind(team.description())
        .bind(team.is_public())
        .bind(team.owner_id().as_uuid())
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, team.name()))?;

        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, description = $3, public = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(team.id().as_uuid())
        .bind(team.name())
        .bind(team.description())
        .bind(team.is_public())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, team.name()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.name()
            )));
        }

        Ok(team)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let limit = query.limit.map(|l| l as i64).unwrap_or(i64::MAX);
        let offset = query.offset.unwrap_or(0) as i64;

        let rows = match query.public {
            Some(public) => {
                sqlx::query(&format!(
                    r#"
                    SELECT {TEAM_COLUMNS} FROM teams
                    WHERE public = $1
                    ORDER BY created_at
                    LIMIT $2 OFFSET $3
                    "#
                ))
                .bind(public)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    r#"
                    SELECT {TEAM_COLUMNS} FROM teams
                    ORDER BY created_at
                    LIMIT $1 OFFSET $2
                    "#
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        let count: i64 = match query.public {
            Some(public) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM teams WHERE public = $1")
                    .bind(public)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM teams")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to count teams: {}", e)))?;

        Ok(count as usize)
    }

    async fn search(&self, query: &str) -> Result<Vec<Team>, DomainError> {
        let pattern = format!("%{}%", query.to_lowercase());

        let rows = sqlx::query(&format!(
            r#"
            SELECT {TEAM_COLUMNS} FROM teams
            WHERE LOWER(name) LIKE $1
            ORDER BY created_at
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to search teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn get_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();

        let rows = sqlx::query(&format!(
            r#"
            SELECT {TEAM_COLUMNS} FROM teams
            WHERE id = ANY($1)
            ORDER BY created_at
            "#
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }
}

fn map_unique_violation(e: sqlx::Error, name: &str) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        DomainError::validation(format!("The team name '{}' is already taken", name))
    } else {
        DomainError::storage(format!("Failed to write team: {}", e))
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: Uuid = row.get("id");
    let name: String = row.get("name");
    let description: String = row.get("description");
    let public: bool = row.get("public");
    let owner_id: Uuid = row.get("owner_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    Ok(Team::from_parts(
        TeamId::from_uuid(id),
        name,
        description,
        public,
        UserId::from_uuid(owner_id),
        created_at,
        updated_at,
    ))
}
