use aws_lambda_events::event::s3::S3Event;
use chrono::NaiveDateTime;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    context::Context,
    models::{BatchObject, IngestResponse},
    service::{dispatch, staging},
};

/// Processes the s3 upload notification
#[tracing::instrument(skip(ctx, event))]
pub async fn handler(ctx: Context, event: LambdaEvent<S3Event>) -> Result<IngestResponse, Error> {
    tracing::info!(
        record_count = event.payload.records.len(),
        "processing s3 event"
    );

    let object = BatchObject::from_event(&event.payload)?;

    let now = || chrono::Utc::now().naive_utc();
    Ok(ingest(&ctx, &object, &now).await?)
}

/// Runs the batch pipeline for one uploaded object.
///
/// Fetch and relocation failures abort the run. Extraction and dispatch failures are
/// logged and the run carries on.
#[tracing::instrument(skip(ctx, now), fields(bucket=%object.bucket, key=%object.key, mode=%ctx.config.ingest_mode))]
pub async fn ingest<F>(ctx: &Context, object: &BatchObject, now: &F) -> anyhow::Result<IngestResponse>
where
    F: Fn() -> NaiveDateTime + Sync,
{
    if object.is_processed() {
        tracing::info!("skipping already processed file");
        return Ok(IngestResponse::skipped(object));
    }

    let staged = staging::stage(ctx.s3_client.as_ref(), ctx.config.ingest_mode, object).await?;

    let subscriber_ids = staged.subscriber_ids(now().date());
    tracing::info!(count = subscriber_ids.len(), "extracted subscriber ids");

    let summary = dispatch::dispatch_all(ctx.dispatcher.as_ref(), &subscriber_ids, now).await;
    tracing::info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "dispatch complete"
    );

    let processed_key = staging::relocate(ctx.s3_client.as_ref(), &staged, object).await?;

    Ok(IngestResponse::processed(&processed_key, &object.bucket))
}
