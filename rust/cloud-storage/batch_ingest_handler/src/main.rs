use std::sync::Arc;

use anyhow::Context as _;
use aws_lambda_events::event::s3::S3Event;
use batch_ingest_handler::{config::Config, context::Context, handler::handler};
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use refresh_service_client::{RefreshDispatcher, RefreshServiceClient, StubRefreshClient};
use vc_entrypoint::Entrypoint;

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;
    tracing::trace!(environment=%config.environment, ingest_mode=%config.ingest_mode, "initialized config");

    let s3_client = s3_client::S3::new(aws_sdk_s3::Client::new(
        &aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await,
    ));
    tracing::trace!("initialized s3 client");

    let dispatcher: Arc<dyn RefreshDispatcher> = match &config.refresh_service_url {
        Some(url) => {
            let client = RefreshServiceClient::new(url.clone(), config.refresh_service_timeout)?;
            tracing::trace!(url=%client.url(), "initialized refresh service client");
            Arc::new(client)
        }
        None => {
            tracing::warn!("REFRESH_SERVICE_URL is not set, refresh commands will only be logged");
            Arc::new(StubRefreshClient)
        }
    };

    let ctx = Context {
        s3_client: Arc::new(s3_client),
        dispatcher,
        config,
    };

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
