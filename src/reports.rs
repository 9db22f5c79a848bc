use crate::types::{
    AccountReportRow, AggregateRow, CampaignReportRow, CanonicalRow, Metrics, Status, YearMonth,
};
use crate::util::{format_number, format_ratio};
use std::collections::HashMap;

/// Which grouping key the aggregation runs under. Both shapes share one
/// routine so the reducer map cannot drift between granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShape {
    Account,
    Campaign,
}

#[derive(Default)]
struct Acc {
    clicks: f64,
    impressions: f64,
    cost: f64,
    conversions: f64,
    search_imp_share: f64,
    budget_lost_imp_share: f64,
    budget_lost_top_imp_share: f64,
    budget_lost_abs_top_imp_share: f64,
    rank_lost_imp_share: f64,
    rank_lost_top_imp_share: f64,
    rank_lost_abs_top_imp_share: f64,
    n: usize,
}

/// Reduce canonical rows to one aggregate per distinct grouping key.
///
/// Volume measures (clicks, impressions, cost, conversions) are summed;
/// the six share measures are arithmetic means over the group's rows.
/// Key equality is exact string equality. Output is sorted ascending by
/// (account, campaign, month) so repeated runs produce identical tables.
pub fn aggregate(data: &[CanonicalRow], shape: GroupShape) -> Vec<AggregateRow> {
    let mut map: HashMap<(String, Option<String>, YearMonth), Acc> = HashMap::new();
    for r in data {
        let campaign = match shape {
            GroupShape::Account => None,
            GroupShape::Campaign => Some(r.campaign.clone()),
        };
        let e = map
            .entry((r.account.clone(), campaign, r.month))
            .or_default();
        e.clicks += r.clicks;
        e.impressions += r.impressions;
        e.cost += r.cost;
        e.conversions += r.conversions;
        e.search_imp_share += r.search_imp_share;
        e.budget_lost_imp_share += r.budget_lost_imp_share;
        e.budget_lost_top_imp_share += r.budget_lost_top_imp_share;
        e.budget_lost_abs_top_imp_share += r.budget_lost_abs_top_imp_share;
        e.rank_lost_imp_share += r.rank_lost_imp_share;
        e.rank_lost_top_imp_share += r.rank_lost_top_imp_share;
        e.rank_lost_abs_top_imp_share += r.rank_lost_abs_top_imp_share;
        e.n += 1;
    }

    let mut rows: Vec<AggregateRow> = map
        .into_iter()
        .map(|((account, campaign, month), acc)| {
            // A group exists iff at least one row produced it, so n >= 1.
            let n = acc.n as f64;
            AggregateRow {
                account,
                campaign,
                month,
                clicks: acc.clicks,
                impressions: acc.impressions,
                cost: acc.cost,
                conversions: acc.conversions,
                search_imp_share: acc.search_imp_share / n,
                budget_lost_imp_share: acc.budget_lost_imp_share / n,
                budget_lost_top_imp_share: acc.budget_lost_top_imp_share / n,
                budget_lost_abs_top_imp_share: acc.budget_lost_abs_top_imp_share / n,
                rank_lost_imp_share: acc.rank_lost_imp_share / n,
                rank_lost_top_imp_share: acc.rank_lost_top_imp_share / n,
                rank_lost_abs_top_imp_share: acc.rank_lost_abs_top_imp_share / n,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        (&a.account, &a.campaign, a.month).cmp(&(&b.account, &b.campaign, b.month))
    });
    rows
}

/// Ratio with explicit division-by-zero semantics: a zero denominator
/// yields the NaN sentinel, never a crash and never a silent 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// Derive the four efficiency metrics from already-summed measures.
/// Summing before dividing is deliberate: averaging per-row ratios would
/// misweight low-volume periods.
pub fn derive_metrics(row: &AggregateRow) -> Metrics {
    Metrics {
        ctr: ratio(row.clicks, row.impressions),
        avg_cpc: ratio(row.cost, row.clicks),
        conv_rate: ratio(row.conversions, row.clicks),
        cost_per_conv: ratio(row.cost, row.conversions),
    }
}

pub fn ctr_status(ctr: f64) -> Status {
    if ctr.is_nan() {
        Status::NoData
    } else if ctr < 0.09 {
        Status::NeedsAttention
    } else {
        Status::Ok
    }
}

pub fn conv_rate_status(conv_rate: f64) -> Status {
    if conv_rate.is_nan() {
        Status::NoData
    } else if conv_rate < 0.05 {
        Status::NeedsAttention
    } else {
        Status::Ok
    }
}

pub fn cost_per_conv_status(cost_per_conv: f64) -> Status {
    if cost_per_conv.is_nan() {
        Status::NoData
    } else if cost_per_conv > 150.0 {
        Status::NeedsAttention
    } else {
        Status::Ok
    }
}

/// Assemble the account-level table: one output row per aggregate row,
/// columns in the exported order.
pub fn account_report(aggregates: &[AggregateRow]) -> Vec<AccountReportRow> {
    aggregates
        .iter()
        .map(|agg| {
            let m = derive_metrics(agg);
            AccountReportRow {
                account: agg.account.clone(),
                month: agg.month.to_string(),
                clicks: format_number(agg.clicks, 0),
                impressions: format_number(agg.impressions, 0),
                ctr: format_ratio(m.ctr, 4),
                ctr_status: ctr_status(m.ctr).to_string(),
                avg_cpc: format_number(m.avg_cpc, 2),
                cost: format_number(agg.cost, 2),
                conversions: format_number(agg.conversions, 2),
                conv_rate: format_ratio(m.conv_rate, 4),
                conv_rate_status: conv_rate_status(m.conv_rate).to_string(),
                cost_per_conv: format_number(m.cost_per_conv, 2),
                cost_per_conv_status: cost_per_conv_status(m.cost_per_conv).to_string(),
                search_imp_share: format_ratio(agg.search_imp_share, 4),
                budget_lost_imp_share: format_ratio(agg.budget_lost_imp_share, 4),
                budget_lost_top_imp_share: format_ratio(agg.budget_lost_top_imp_share, 4),
                budget_lost_abs_top_imp_share: format_ratio(agg.budget_lost_abs_top_imp_share, 4),
                rank_lost_imp_share: format_ratio(agg.rank_lost_imp_share, 4),
                rank_lost_top_imp_share: format_ratio(agg.rank_lost_top_imp_share, 4),
                rank_lost_abs_top_imp_share: format_ratio(agg.rank_lost_abs_top_imp_share, 4),
            }
        })
        .collect()
}

/// Assemble the campaign-level table; same columns with Campaign after
/// Account.
pub fn campaign_report(aggregates: &[AggregateRow]) -> Vec<CampaignReportRow> {
    aggregates
        .iter()
        .map(|agg| {
            let m = derive_metrics(agg);
            CampaignReportRow {
                account: agg.account.clone(),
                campaign: agg.campaign.clone().unwrap_or_default(),
                month: agg.month.to_string(),
                clicks: format_number(agg.clicks, 0),
                impressions: format_number(agg.impressions, 0),
                ctr: format_ratio(m.ctr, 4),
                ctr_status: ctr_status(m.ctr).to_string(),
                avg_cpc: format_number(m.avg_cpc, 2),
                cost: format_number(agg.cost, 2),
                conversions: format_number(agg.conversions, 2),
                conv_rate: format_ratio(m.conv_rate, 4),
                conv_rate_status: conv_rate_status(m.conv_rate).to_string(),
                cost_per_conv: format_number(m.cost_per_conv, 2),
                cost_per_conv_status: cost_per_conv_status(m.cost_per_conv).to_string(),
                search_imp_share: format_ratio(agg.search_imp_share, 4),
                budget_lost_imp_share: format_ratio(agg.budget_lost_imp_share, 4),
                budget_lost_top_imp_share: format_ratio(agg.budget_lost_top_imp_share, 4),
                budget_lost_abs_top_imp_share: format_ratio(agg.budget_lost_abs_top_imp_share, 4),
                rank_lost_imp_share: format_ratio(agg.rank_lost_imp_share, 4),
                rank_lost_top_imp_share: format_ratio(agg.rank_lost_top_imp_share, 4),
                rank_lost_abs_top_imp_share: format_ratio(agg.rank_lost_abs_top_imp_share, 4),
            }
        })
        .collect()
}
