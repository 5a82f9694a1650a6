use anyhow::Context;
pub use vc_entrypoint::Environment;

/// The configuration parameters for the lookup lambda, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// The bucket the daily snapshot files are published to
    pub snapshot_bucket: String,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let snapshot_bucket =
            std::env::var("SNAPSHOT_BUCKET").context("SNAPSHOT_BUCKET must be provided")?;
        Ok(Config {
            snapshot_bucket,
            environment: Environment::new_or_prod(),
        })
    }
}
