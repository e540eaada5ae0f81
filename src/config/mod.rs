pub mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, DatabaseConfig, InvitationSettings, LogFormat, LoggingConfig,
    MailSettings, ServerConfig, StorageBackend,
};
