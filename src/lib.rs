//! Crowd Teams
//!
//! Team management service for a crowdsourcing platform:
//! - Public and private (invitation-only) teams
//! - Signed, time-limited invitation tokens delivered by email
//! - Cached team listings, member lists and rank aggregates

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::auth::{RolePolicy, TeamPolicy};
use domain::cache::Cache;
use domain::mail::Mailer;
use domain::membership::MembershipRepository;
use domain::team::TeamRepository;
use domain::token::InviteTokenCodec;
use domain::user::UserRepository;
use infrastructure::cache::{create_cache, CacheConfig, CacheType};
use infrastructure::mail::{HttpMailer, HttpMailerConfig, LogMailer};
use infrastructure::membership::{
    InMemoryMembershipRepository, MembershipWorkflow, PostgresMembershipRepository, WorkflowConfig,
};
use infrastructure::storage::{self, PostgresConfig};
use infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository, TeamDirectory};
use infrastructure::token::HmacInviteSigner;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserDirectory};

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache_type: CacheType = config.cache.backend.parse()?;

    info!(backend = %cache_type, "Initializing cache");

    let cache = create_cache(&CacheConfig {
        cache_type,
        redis_url: config.cache.redis_url.clone(),
        key_prefix: config.cache.key_prefix.clone(),
        default_ttl: Duration::from_secs(config.cache.default_ttl_secs),
        max_capacity: config.cache.max_capacity,
    })
    .await?;

    let codec: Arc<dyn InviteTokenCodec> =
        Arc::new(HmacInviteSigner::new(config.invitations.secret.clone()));
    let mailer = create_mailer(config)?;

    match config.database.backend {
        StorageBackend::Postgres => {
            info!("Using PostgreSQL storage");

            let pool = storage::connect(&PostgresConfig {
                url: config.database.url.clone(),
                max_connections: config.database.max_connections,
                min_connections: config.database.min_connections,
                connect_timeout_secs: config.database.connect_timeout_secs,
                idle_timeout_secs: config.database.idle_timeout_secs,
            })
            .await?;

            storage::run_migrations(&pool).await?;

            Ok(build_state(
                Arc::new(PostgresTeamRepository::new(pool.clone())),
                Arc::new(PostgresMembershipRepository::new(pool.clone())),
                Arc::new(PostgresUserRepository::new(pool)),
                cache,
                codec,
                mailer,
                config,
            ))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; state is lost on restart");

            Ok(build_state(
                Arc::new(InMemoryTeamRepository::new()),
                Arc::new(InMemoryMembershipRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                cache,
                codec,
                mailer,
                config,
            ))
        }
    }
}

fn create_mailer(config: &AppConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    if config.mail.endpoint.is_empty() {
        info!("No mail endpoint configured; invitation emails go to the log");
        return Ok(Arc::new(LogMailer::new()));
    }

    let mailer = HttpMailer::new(HttpMailerConfig {
        endpoint: config.mail.endpoint.clone(),
        api_key: config.mail.api_key.clone(),
        from: config.mail.from.clone(),
        timeout: Duration::from_secs(config.mail.timeout_secs),
    })?;

    Ok(Arc::new(mailer))
}

fn build_state<T, M, U>(
    teams: Arc<T>,
    memberships: Arc<M>,
    users: Arc<U>,
    cache: Arc<dyn Cache>,
    codec: Arc<dyn InviteTokenCodec>,
    mailer: Arc<dyn Mailer>,
    config: &AppConfig,
) -> AppState
where
    T: TeamRepository + 'static,
    M: MembershipRepository + 'static,
    U: UserRepository + 'static,
{
    let cache_ttl = Duration::from_secs(config.cache.default_ttl_secs);
    let policy: Arc<dyn TeamPolicy> = Arc::new(RolePolicy);

    let directory = Arc::new(TeamDirectory::new(
        teams,
        memberships.clone(),
        users.clone(),
        cache.clone(),
        policy,
        cache_ttl,
    ));

    let workflow = Arc::new(MembershipWorkflow::new(
        directory.clone(),
        memberships.clone(),
        users.clone(),
        cache,
        codec,
        mailer,
        WorkflowConfig {
            base_url: config.server.base_url.clone(),
            invite_max_age: Duration::from_secs(config.invitations.max_age_secs),
            cache_ttl,
        },
    ));

    let user_directory = Arc::new(UserDirectory::new(users, memberships));

    AppState {
        teams: directory,
        memberships: workflow,
        users: user_directory,
    }
}
