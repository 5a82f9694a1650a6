use chrono::NaiveDate;
use lambda_runtime::tracing;

/// Collects the subscriber ids of every row whose first column contains `today` as `YYYYMMDD`.
///
/// The batch files have no header row and rows are not required to share a width.
/// Ids are returned trimmed, in file order, duplicates included.
#[tracing::instrument(skip(reader))]
pub fn subscriber_ids<R: std::io::Read>(
    reader: R,
    today: NaiveDate,
) -> Result<Vec<String>, csv::Error> {
    let date = today.format("%Y%m%d").to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut subscriber_ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(0) {
            Some(first) if first.contains(&date) => subscriber_ids.push(first.trim().to_string()),
            _ => (),
        }
    }

    Ok(subscriber_ids)
}
