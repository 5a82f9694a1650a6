use chrono::NaiveDateTime;
use futures::{StreamExt, stream};
use lambda_runtime::tracing;
use refresh_service_client::{CommandPacket, RefreshDispatcher};

use crate::models::DispatchResult;

/// Maximum number of refresh commands in flight at once
pub const MAX_CONCURRENT_DISPATCHES: usize = 8;

/// Counts of a dispatch run, only used for logging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sends a refresh command for every subscriber id, [MAX_CONCURRENT_DISPATCHES] at a time.
///
/// Every id is attempted regardless of the others failing. `now` stamps each packet at
/// the moment it is built.
#[tracing::instrument(skip_all, fields(count = subscriber_ids.len()))]
pub async fn dispatch_all<F>(
    dispatcher: &dyn RefreshDispatcher,
    subscriber_ids: &[String],
    now: &F,
) -> DispatchSummary
where
    F: Fn() -> NaiveDateTime + Sync,
{
    let results = stream::iter(subscriber_ids)
        .map(|subscriber_id| async move {
            let result = refresh_subscriber(dispatcher, subscriber_id, now()).await;
            (subscriber_id, result)
        })
        .buffer_unordered(MAX_CONCURRENT_DISPATCHES)
        .collect::<Vec<_>>()
        .await;

    let mut summary = DispatchSummary {
        attempted: results.len(),
        ..Default::default()
    };

    for (subscriber_id, result) in results {
        match result {
            Ok(result) if result.status => summary.succeeded += 1,
            Ok(result) => {
                summary.failed += 1;
                tracing::warn!(subscriber_id=%subscriber_id, details=?result.details, "refresh was not accepted");
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(error=?e, subscriber_id=%subscriber_id, "error processing subscriber id");
            }
        }
    }

    summary
}

#[tracing::instrument(skip(dispatcher))]
async fn refresh_subscriber(
    dispatcher: &dyn RefreshDispatcher,
    subscriber_id: &str,
    now: NaiveDateTime,
) -> anyhow::Result<DispatchResult> {
    let packet = CommandPacket::refresh(subscriber_id, now);
    tracing::info!(packet=%packet, "packet made for request");

    let response = dispatcher.send(&packet).await?;
    tracing::info!(request=%response.request, "connection done");

    let result = DispatchResult::from(response);
    tracing::info!(
        status = result.status,
        status_message = %result.status_message,
        result = %serde_json::to_string(&result).unwrap_or_default(),
        "processed subscriber id"
    );

    Ok(result)
}
