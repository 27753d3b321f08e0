//! Output document assembly.

use chrono::NaiveDateTime;
use tracing::info;

use activity_model::{
    ActivityRecord, DOCUMENT_VERSION, DocumentMetadata, GENERATED_BY, IMPORT_SOURCE,
    OutputDocument,
};

/// Wraps normalized records in the output envelope.
///
/// Record order is kept as given; `now` stamps both `created_at` and
/// `last_updated`.
pub fn assemble(activities: Vec<ActivityRecord>, now: NaiveDateTime) -> OutputDocument {
    let total_activities = activities.len();
    info!(total_activities, "assembled output document");
    OutputDocument {
        activities,
        metadata: DocumentMetadata {
            version: DOCUMENT_VERSION.to_string(),
            created_at: now,
            last_updated: now,
            total_activities,
            source: IMPORT_SOURCE.to_string(),
            generated_by: GENERATED_BY.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use activity_model::{Diagnostics, RawRow};
    use activity_transform::RecordNormalizer;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 30)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn empty_batch_still_gets_metadata() {
        let document = assemble(Vec::new(), now());
        assert!(document.activities.is_empty());
        assert_eq!(document.metadata.total_activities, 0);
        assert_eq!(document.metadata.version, "2.0");
        assert_eq!(document.metadata.source, "csv_import");
        assert_eq!(document.metadata.created_at, document.metadata.last_updated);
    }

    #[test]
    fn keeps_record_order() {
        let normalizer = RecordNormalizer::default().with_timestamp(now());
        let mut diagnostics = Diagnostics::new();
        let records: Vec<_> = ["Zebra Ride", "Apple Picking", "Movie Night"]
            .into_iter()
            .map(|name| {
                let row = RawRow::new().with("name", name).with("category", "hobby");
                normalizer
                    .build_record(&row, None, &mut diagnostics)
                    .unwrap()
            })
            .collect();

        let document = assemble(records, now());
        let ids: Vec<_> = document.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["zebra_ride", "apple_picking", "movie_night"]);
        assert_eq!(document.metadata.total_activities, 3);
    }
}
