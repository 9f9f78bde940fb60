mod cli;
mod tables;

use thiserror::Error;

use enrolldesk::config::ConfigError;
use enrolldesk::forms::SaveError;
use enrolldesk::telemetry::TelemetryError;
use enrolldesk::ApiError;

/// Everything that can abort a console invocation.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("unknown catalog '{0}'")]
    UnknownCatalog(String),
}

pub async fn run() -> Result<(), ConsoleError> {
    cli::run().await
}
