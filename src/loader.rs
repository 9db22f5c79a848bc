use crate::error::Result;
use crate::schema;
use crate::types::{CanonicalRow, RawRow, YearMonth};
use crate::util::{parse_date, parse_f64};
use csv::ReaderBuilder;

/// Counters describing what happened to the uploaded file during
/// ingestion. `defaulted_values` is informational only: a numeric cell
/// that failed to parse was set to 0.0, never rejected.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub rejected_rows: usize,
    pub defaulted_values: usize,
}

/// Load the export, normalize its header, and coerce every row.
///
/// A missing required column fails the whole run before any row is read.
/// A row whose date does not parse as `YYYY-MM-DD` is dropped and
/// counted; dates anchor the aggregation key, so defaulting one would
/// silently corrupt the month buckets. Numeric cells that fail to parse
/// become 0.0 ("no activity") and are counted.
pub fn load_and_clean(path: &str) -> Result<(Vec<CanonicalRow>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = schema::normalize_headers(rdr.headers()?);
    schema::check_required(&headers)?;

    let mut total_rows = 0usize;
    let mut rejected_rows = 0usize;
    let mut defaulted_values = 0usize;
    let mut rows: Vec<CanonicalRow> = Vec::new();

    for result in rdr.records() {
        total_rows += 1;
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                rejected_rows += 1;
                continue;
            }
        };
        let raw: RawRow = match record.deserialize(Some(&headers)) {
            Ok(r) => r,
            Err(_) => {
                rejected_rows += 1;
                continue;
            }
        };

        let date = match parse_date(raw.date.as_deref()) {
            Some(d) => d,
            None => {
                rejected_rows += 1;
                continue;
            }
        };

        // Only non-empty junk counts as "defaulted"; an empty cell is an
        // ordinary absent measurement.
        let mut coerce = |s: &Option<String>| match parse_f64(s.as_deref()) {
            Some(v) => v,
            None => {
                if s.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                    defaulted_values += 1;
                }
                0.0
            }
        };

        let clicks = coerce(&raw.clicks);
        let impressions = coerce(&raw.impressions);
        let cost = coerce(&raw.cost);
        let conversions = coerce(&raw.conversions);
        let search_imp_share = coerce(&raw.search_imp_share);
        let budget_lost_imp_share = coerce(&raw.budget_lost_imp_share);
        let budget_lost_top_imp_share = coerce(&raw.budget_lost_top_imp_share);
        let budget_lost_abs_top_imp_share = coerce(&raw.budget_lost_abs_top_imp_share);
        let rank_lost_imp_share = coerce(&raw.rank_lost_imp_share);
        let rank_lost_top_imp_share = coerce(&raw.rank_lost_top_imp_share);
        let rank_lost_abs_top_imp_share = coerce(&raw.rank_lost_abs_top_imp_share);

        let account = raw
            .account
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();
        let campaign = raw
            .campaign
            .unwrap_or_else(|| "Unknown".to_string())
            .trim()
            .to_string();

        rows.push(CanonicalRow {
            account,
            campaign,
            date,
            month: YearMonth::from_date(date),
            clicks,
            impressions,
            cost,
            conversions,
            search_imp_share,
            budget_lost_imp_share,
            budget_lost_top_imp_share,
            budget_lost_abs_top_imp_share,
            rank_lost_imp_share,
            rank_lost_top_imp_share,
            rank_lost_abs_top_imp_share,
        });
    }

    let report = LoadReport {
        total_rows,
        kept_rows: rows.len(),
        rejected_rows,
        defaulted_values,
    };
    Ok((rows, report))
}
