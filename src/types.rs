use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One record of the uploaded export, seen through the canonical column
/// names produced by the schema normalizer. Every field is optional text:
/// the file is untrusted until the loader has coerced it.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Account")]
    pub account: Option<String>,
    #[serde(rename = "Campaign")]
    pub campaign: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Clicks")]
    pub clicks: Option<String>,
    #[serde(rename = "Impressions")]
    pub impressions: Option<String>,
    #[serde(rename = "Cost")]
    pub cost: Option<String>,
    #[serde(rename = "Conversions")]
    pub conversions: Option<String>,
    #[serde(rename = "Search Imp. Share")]
    pub search_imp_share: Option<String>,
    #[serde(rename = "Search Budget Lost Imp Share")]
    pub budget_lost_imp_share: Option<String>,
    #[serde(rename = "Search Budget Lost Top Imp Share")]
    pub budget_lost_top_imp_share: Option<String>,
    #[serde(rename = "Search Budget Lost Abs Top Imp Share")]
    pub budget_lost_abs_top_imp_share: Option<String>,
    #[serde(rename = "Search Rank Lost Imp Share")]
    pub rank_lost_imp_share: Option<String>,
    #[serde(rename = "Search Rank Lost Top Imp Share")]
    pub rank_lost_top_imp_share: Option<String>,
    #[serde(rename = "Search Rank Lost Abs Top Imp Share")]
    pub rank_lost_abs_top_imp_share: Option<String>,
}

/// Calendar bucket: year and month, day-of-month discarded. Two dates in
/// the same month collapse to the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A fully coerced observation: typed date, derived month bucket, and all
/// eleven measures as `f64` (unparseable measures already defaulted to 0).
#[derive(Debug, Clone)]
pub struct CanonicalRow {
    pub account: String,
    pub campaign: String,
    pub date: NaiveDate,
    pub month: YearMonth,
    pub clicks: f64,
    pub impressions: f64,
    pub cost: f64,
    pub conversions: f64,
    pub search_imp_share: f64,
    pub budget_lost_imp_share: f64,
    pub budget_lost_top_imp_share: f64,
    pub budget_lost_abs_top_imp_share: f64,
    pub rank_lost_imp_share: f64,
    pub rank_lost_top_imp_share: f64,
    pub rank_lost_abs_top_imp_share: f64,
}

/// One reduced record per grouping key. `campaign` is `None` at the
/// account granularity. Volume measures are sums over the group, the six
/// share measures are arithmetic means.
#[derive(Debug, Clone)]
pub struct AggregateRow {
    pub account: String,
    pub campaign: Option<String>,
    pub month: YearMonth,
    pub clicks: f64,
    pub impressions: f64,
    pub cost: f64,
    pub conversions: f64,
    pub search_imp_share: f64,
    pub budget_lost_imp_share: f64,
    pub budget_lost_top_imp_share: f64,
    pub budget_lost_abs_top_imp_share: f64,
    pub rank_lost_imp_share: f64,
    pub rank_lost_top_imp_share: f64,
    pub rank_lost_abs_top_imp_share: f64,
}

/// Efficiency ratios derived from an aggregate row's summed measures.
/// A zero denominator yields `f64::NAN`, rendered as the literal text
/// `NaN` in previews and exports.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub ctr: f64,
    pub avg_cpc: f64,
    pub conv_rate: f64,
    pub cost_per_conv: f64,
}

/// Threshold classification attached to CTR, Conv. Rate and Cost/Conv.
/// `NoData` marks a NaN metric: there was no volume to judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NeedsAttention,
    NoData,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ok => "Ok",
            Status::NeedsAttention => "Needs attention",
            Status::NoData => "No data",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AccountReportRow {
    #[serde(rename = "Account")]
    #[tabled(rename = "Account")]
    pub account: String,
    #[serde(rename = "YearMonth")]
    #[tabled(rename = "YearMonth")]
    pub month: String,
    #[serde(rename = "Clicks")]
    #[tabled(rename = "Clicks")]
    pub clicks: String,
    #[serde(rename = "Impressions")]
    #[tabled(rename = "Impressions")]
    pub impressions: String,
    #[serde(rename = "CTR")]
    #[tabled(rename = "CTR")]
    pub ctr: String,
    #[serde(rename = "CTR Status")]
    #[tabled(rename = "CTR Status")]
    pub ctr_status: String,
    #[serde(rename = "Avg CPC")]
    #[tabled(rename = "Avg CPC")]
    pub avg_cpc: String,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Conversions")]
    #[tabled(rename = "Conversions")]
    pub conversions: String,
    #[serde(rename = "Conv. Rate")]
    #[tabled(rename = "Conv. Rate")]
    pub conv_rate: String,
    #[serde(rename = "Conv. Rate Status")]
    #[tabled(rename = "Conv. Rate Status")]
    pub conv_rate_status: String,
    #[serde(rename = "Cost/Conv.")]
    #[tabled(rename = "Cost/Conv.")]
    pub cost_per_conv: String,
    #[serde(rename = "Cost/Conv. Status")]
    #[tabled(rename = "Cost/Conv. Status")]
    pub cost_per_conv_status: String,
    #[serde(rename = "Search Imp. Share")]
    #[tabled(rename = "Search Imp. Share")]
    pub search_imp_share: String,
    #[serde(rename = "Search Budget Lost Imp Share")]
    #[tabled(rename = "Search Budget Lost Imp Share")]
    pub budget_lost_imp_share: String,
    #[serde(rename = "Search Budget Lost Top Imp Share")]
    #[tabled(rename = "Search Budget Lost Top Imp Share")]
    pub budget_lost_top_imp_share: String,
    #[serde(rename = "Search Budget Lost Abs Top Imp Share")]
    #[tabled(rename = "Search Budget Lost Abs Top Imp Share")]
    pub budget_lost_abs_top_imp_share: String,
    #[serde(rename = "Search Rank Lost Imp Share")]
    #[tabled(rename = "Search Rank Lost Imp Share")]
    pub rank_lost_imp_share: String,
    #[serde(rename = "Search Rank Lost Top Imp Share")]
    #[tabled(rename = "Search Rank Lost Top Imp Share")]
    pub rank_lost_top_imp_share: String,
    #[serde(rename = "Search Rank Lost Abs Top Imp Share")]
    #[tabled(rename = "Search Rank Lost Abs Top Imp Share")]
    pub rank_lost_abs_top_imp_share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CampaignReportRow {
    #[serde(rename = "Account")]
    #[tabled(rename = "Account")]
    pub account: String,
    #[serde(rename = "Campaign")]
    #[tabled(rename = "Campaign")]
    pub campaign: String,
    #[serde(rename = "YearMonth")]
    #[tabled(rename = "YearMonth")]
    pub month: String,
    #[serde(rename = "Clicks")]
    #[tabled(rename = "Clicks")]
    pub clicks: String,
    #[serde(rename = "Impressions")]
    #[tabled(rename = "Impressions")]
    pub impressions: String,
    #[serde(rename = "CTR")]
    #[tabled(rename = "CTR")]
    pub ctr: String,
    #[serde(rename = "CTR Status")]
    #[tabled(rename = "CTR Status")]
    pub ctr_status: String,
    #[serde(rename = "Avg CPC")]
    #[tabled(rename = "Avg CPC")]
    pub avg_cpc: String,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Conversions")]
    #[tabled(rename = "Conversions")]
    pub conversions: String,
    #[serde(rename = "Conv. Rate")]
    #[tabled(rename = "Conv. Rate")]
    pub conv_rate: String,
    #[serde(rename = "Conv. Rate Status")]
    #[tabled(rename = "Conv. Rate Status")]
    pub conv_rate_status: String,
    #[serde(rename = "Cost/Conv.")]
    #[tabled(rename = "Cost/Conv.")]
    pub cost_per_conv: String,
    #[serde(rename = "Cost/Conv. Status")]
    #[tabled(rename = "Cost/Conv. Status")]
    pub cost_per_conv_status: String,
    #[serde(rename = "Search Imp. Share")]
    #[tabled(rename = "Search Imp. Share")]
    pub search_imp_share: String,
    #[serde(rename = "Search Budget Lost Imp Share")]
    #[tabled(rename = "Search Budget Lost Imp Share")]
    pub budget_lost_imp_share: String,
    #[serde(rename = "Search Budget Lost Top Imp Share")]
    #[tabled(rename = "Search Budget Lost Top Imp Share")]
    pub budget_lost_top_imp_share: String,
    #[serde(rename = "Search Budget Lost Abs Top Imp Share")]
    #[tabled(rename = "Search Budget Lost Abs Top Imp Share")]
    pub budget_lost_abs_top_imp_share: String,
    #[serde(rename = "Search Rank Lost Imp Share")]
    #[tabled(rename = "Search Rank Lost Imp Share")]
    pub rank_lost_imp_share: String,
    #[serde(rename = "Search Rank Lost Top Imp Share")]
    #[tabled(rename = "Search Rank Lost Top Imp Share")]
    pub rank_lost_top_imp_share: String,
    #[serde(rename = "Search Rank Lost Abs Top Imp Share")]
    #[tabled(rename = "Search Rank Lost Abs Top Imp Share")]
    pub rank_lost_abs_top_imp_share: String,
}
