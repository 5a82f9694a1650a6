mod config;
mod context;
mod handler;
mod models;
mod snapshot;

use std::sync::Arc;

use anyhow::Context as _;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use models::LookupRequest;
use vc_entrypoint::Entrypoint;

use crate::{config::Config, context::Context};

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;
    tracing::trace!(environment=%config.environment, "initialized config");

    let s3_client = s3_client::S3::new(aws_sdk_s3::Client::new(
        &aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await,
    ));
    tracing::trace!("initialized s3 client");

    let ctx = Context {
        s3_client: Arc::new(s3_client),
        config,
    };

    let func = service_fn(move |event: LambdaEvent<LookupRequest>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
