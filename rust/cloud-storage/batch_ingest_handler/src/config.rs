use std::time::Duration;

use anyhow::Context;
pub use vc_entrypoint::Environment;

use crate::models::IngestMode;

/// The configuration parameters for the ingest lambda, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// How batch files are staged and relocated. Defaults to [IngestMode::InMemory]
    pub ingest_mode: IngestMode,

    /// The refresh service endpoint. Refresh commands are only logged when this is absent
    pub refresh_service_url: Option<String>,

    /// Per request timeout for the refresh service
    pub refresh_service_timeout: Option<Duration>,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let ingest_mode = match var("INGEST_MODE") {
            Some(mode) => mode
                .parse::<IngestMode>()
                .context("INGEST_MODE must be one of scratch, in_memory")?,
            None => IngestMode::default(),
        };

        let refresh_service_timeout = var("REFRESH_SERVICE_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .context("REFRESH_SERVICE_TIMEOUT_SECS must be a number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Config {
            ingest_mode,
            refresh_service_url: var("REFRESH_SERVICE_URL"),
            refresh_service_timeout,
            environment: Environment::new_or_prod(),
        })
    }
}
