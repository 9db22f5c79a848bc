// Chart-feed data for the external renderer.
//
// The core hands the renderer raw month-ordered values; figure styling,
// point labels and any output directory belong to the renderer side.
use crate::types::AggregateRow;
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct SeriesPoint {
    pub month: String,
    pub clicks: f64,
    pub conversions: f64,
}

/// Clicks and conversions over time for one account or one
/// (account, campaign) pair. Points ascend by month.
#[derive(Debug, Serialize, Clone)]
pub struct PerformanceSeries {
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    pub points: Vec<SeriesPoint>,
}

/// Fold sorted aggregate rows into one series per grouping key.
///
/// Expects the aggregator's output order (account, campaign, month
/// ascending); consecutive rows with the same key become consecutive
/// points, so each series is already month-ordered.
pub fn build_series(aggregates: &[AggregateRow]) -> Vec<PerformanceSeries> {
    let mut out: Vec<PerformanceSeries> = Vec::new();
    for agg in aggregates {
        let point = SeriesPoint {
            month: agg.month.to_string(),
            clicks: agg.clicks,
            conversions: agg.conversions,
        };
        match out.last_mut() {
            Some(s) if s.account == agg.account && s.campaign == agg.campaign => {
                s.points.push(point)
            }
            _ => out.push(PerformanceSeries {
                account: agg.account.clone(),
                campaign: agg.campaign.clone(),
                points: vec![point],
            }),
        }
    }
    out
}
