use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, moderation, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, export, utils};

use auth::secret::SharedSecret;
use repositories::{experience::SharedExperienceRepo, sqlx_repo::SqlxExperienceRepo};
use use_cases::{
    experience::ExperienceQueryHandler,
    health::HealthCheckHandler,
    moderation::ModerationHandler,
    submission::SubmissionHandler,
};

pub struct AppState {
    pub submission_handler: SubmissionHandler<SharedExperienceRepo>,
    pub experience_handler: ExperienceQueryHandler<SharedExperienceRepo>,
    pub moderation_handler: ModerationHandler<SharedExperienceRepo>,
    pub health_handler: HealthCheckHandler<SharedExperienceRepo>,
    pub admin_secret: SharedSecret,
    pub cron_secret: SharedSecret,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let experience_repo: SharedExperienceRepo = Arc::new(SqlxExperienceRepo::new(pool));
        Self::with_repository(config, experience_repo)
    }

    /// Builds the state over any store; every handler shares the same one.
    pub fn with_repository(config: &settings::AppConfig, experience_repo: SharedExperienceRepo) -> Self {
        AppState {
            submission_handler: SubmissionHandler::new(experience_repo.clone()),
            experience_handler: ExperienceQueryHandler::new(experience_repo.clone()),
            moderation_handler: ModerationHandler::new(experience_repo.clone()),
            health_handler: HealthCheckHandler::new(
                experience_repo,
                config.health_recent_window_days,
                config.health_retention_days,
            ),
            admin_secret: SharedSecret::new(config.admin_secret()),
            cron_secret: SharedSecret::new(config.cron_secret()),
        }
    }
}
