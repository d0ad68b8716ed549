use serde_json::Value;

use crate::source::Record;

/// Field whose non-null presence marks a record as a usable track play.
pub const TRACK_URI_FIELD: &str = "spotify_track_uri";

/// Delete the given columns from every record and drop records whose
/// `spotify_track_uri` is missing or null. Deleting an absent column is a
/// no-op. Survivor order matches input order.
pub fn sanitize(records: Vec<Record>, columns_to_remove: &[String]) -> Vec<Record> {
    records
        .into_iter()
        .filter_map(|mut record| {
            for column in columns_to_remove {
                record.remove(column);
            }
            match record.get(TRACK_URI_FIELD) {
                Some(Value::Null) | None => None,
                Some(_) => Some(record),
            }
        })
        .collect()
}
