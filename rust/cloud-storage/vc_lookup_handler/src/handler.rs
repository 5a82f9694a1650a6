use chrono::NaiveDate;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    context::Context,
    models::{LambdaResponse, LookupError, LookupRequest, LookupStatus, VcNumber, snapshot_key},
    snapshot,
};

/// Handles a vc number lookup invocation
#[tracing::instrument(skip(ctx, event))]
pub async fn handler(
    ctx: Context,
    event: LambdaEvent<LookupRequest>,
) -> Result<LambdaResponse, Error> {
    let today = chrono::Utc::now().date_naive();
    lookup(&ctx, &event.payload, today).await
}

/// Checks whether the requested vc number is listed in the snapshot published for `today`
#[tracing::instrument(skip(ctx, request))]
pub(crate) async fn lookup(
    ctx: &Context,
    request: &LookupRequest,
    today: NaiveDate,
) -> Result<LambdaResponse, Error> {
    tracing::info!(vc_num=%request.vc_num, "vc number lookup received");

    let vc_number = match VcNumber::try_from(request.vc_num.as_str()) {
        Ok(vc_number) => vc_number,
        Err(e) => {
            let LookupError::InvalidFormat { length } = &e;
            tracing::warn!(length, "rejecting vc number");
            return Ok(LambdaResponse::json(400, &e.to_string())?);
        }
    };

    tracing::info!(vc_number=%vc_number, "adjusted vc number");

    let key = snapshot_key(today);
    let content =
        snapshot::read_snapshot(ctx.s3_client.as_ref(), &ctx.config.snapshot_bucket, &key).await;

    let status = LookupStatus::new(snapshot::contains(&content, &vc_number));

    tracing::info!(status_message=%status.status_message, "vc number status");

    Ok(LambdaResponse::json(200, &status)?)
}
