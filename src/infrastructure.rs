// Infrastructure layer modules
pub mod config;
pub mod entity_repository;
pub mod logging;

// Re-exports
pub use config::{AppConfig, AppConfigError};
pub use entity_repository::{DynamoEntityRepository, EntityRepository, RepositoryError};
pub use logging::init_logging;
