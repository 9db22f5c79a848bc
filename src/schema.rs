// Header normalization for the uploaded export.
//
// The export tool emits snake_case column names; the pipeline works in
// terms of the canonical report names. Renaming happens once, on the
// header record, before any row is deserialized.
use crate::error::{ReportError, Result};
use csv::StringRecord;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Source column name -> canonical column name. Columns not listed here
/// pass through unchanged, so a file that already uses canonical names
/// is accepted as-is.
static RENAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("account_name", "Account"),
        ("campaign", "Campaign"),
        ("date", "Date"),
        ("clicks", "Clicks"),
        ("impressions", "Impressions"),
        ("ctr", "CTR"),
        ("average_cpc", "Avg CPC"),
        ("cost", "Cost"),
        ("conversions", "Conversions"),
        ("conversion_rate", "Conv. Rate"),
        ("cost_per_conversion", "Cost/Conv."),
        ("search_impression_share", "Search Imp. Share"),
        (
            "search_budget_lost_absolute_top_impression_share",
            "Search Budget Lost Abs Top Imp Share",
        ),
        (
            "search_budget_lost_impression_share",
            "Search Budget Lost Imp Share",
        ),
        (
            "search_budget_lost_top_impression_share",
            "Search Budget Lost Top Imp Share",
        ),
        (
            "search_rank_lost_absolute_top_impression_share",
            "Search Rank Lost Abs Top Imp Share",
        ),
        (
            "search_rank_lost_impression_share",
            "Search Rank Lost Imp Share",
        ),
        (
            "search_rank_lost_top_impression_share",
            "Search Rank Lost Top Imp Share",
        ),
    ])
});

/// Canonical columns the pipeline reads. The CTR / Avg CPC / Conv. Rate /
/// Cost/Conv. inputs are recognized but not required: they are recomputed
/// from aggregates and never read back.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "Account",
    "Campaign",
    "Date",
    "Clicks",
    "Impressions",
    "Cost",
    "Conversions",
    "Search Imp. Share",
    "Search Budget Lost Imp Share",
    "Search Budget Lost Top Imp Share",
    "Search Budget Lost Abs Top Imp Share",
    "Search Rank Lost Imp Share",
    "Search Rank Lost Top Imp Share",
    "Search Rank Lost Abs Top Imp Share",
];

/// Rewrite a header record into canonical column names. Unrecognized
/// names pass through unchanged.
pub fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|h| {
            let h = h.trim();
            *RENAMES.get(h).unwrap_or(&h)
        })
        .collect()
}

/// Verify every required column resolved. Reports all missing columns at
/// once so one fix-upload cycle is enough.
pub fn check_required(headers: &StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !headers.iter().any(|h| h == **req))
        .map(|req| req.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::Schema { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_normalize_maps_source_names() {
        let headers = record(&["account_name", "campaign", "date", "clicks"]);
        let normalized = normalize_headers(&headers);
        assert_eq!(
            normalized,
            record(&["Account", "Campaign", "Date", "Clicks"])
        );
    }

    #[test]
    fn test_normalize_passes_through_canonical_and_unknown_names() {
        let headers = record(&["Account", "campaign_status", "date"]);
        let normalized = normalize_headers(&headers);
        assert_eq!(normalized, record(&["Account", "campaign_status", "Date"]));
    }

    #[test]
    fn test_normalize_maps_all_search_loss_columns() {
        let headers = record(&[
            "search_impression_share",
            "search_budget_lost_impression_share",
            "search_budget_lost_top_impression_share",
            "search_budget_lost_absolute_top_impression_share",
            "search_rank_lost_impression_share",
            "search_rank_lost_top_impression_share",
            "search_rank_lost_absolute_top_impression_share",
        ]);
        let normalized = normalize_headers(&headers);
        assert_eq!(
            normalized,
            record(&[
                "Search Imp. Share",
                "Search Budget Lost Imp Share",
                "Search Budget Lost Top Imp Share",
                "Search Budget Lost Abs Top Imp Share",
                "Search Rank Lost Imp Share",
                "Search Rank Lost Top Imp Share",
                "Search Rank Lost Abs Top Imp Share",
            ])
        );
    }

    #[test]
    fn test_check_required_accepts_complete_header() {
        let headers = record(&REQUIRED_COLUMNS);
        assert!(check_required(&headers).is_ok());
    }

    #[test]
    fn test_check_required_names_every_missing_column() {
        let headers = record(&["Account", "Campaign", "Clicks"]);
        let err = check_required(&headers).unwrap_err();
        match err {
            ReportError::Schema { missing } => {
                assert!(missing.contains(&"Date".to_string()));
                assert!(missing.contains(&"Search Imp. Share".to_string()));
                assert!(!missing.contains(&"Account".to_string()));
                assert!(!missing.contains(&"Clicks".to_string()));
            }
            other => panic!("expected schema error, got {other}"),
        }
    }
}
