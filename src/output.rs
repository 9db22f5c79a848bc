use crate::error::Result;
use crate::series::PerformanceSeries;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Write rows as CSV: header taken from the struct field order, UTF-8,
/// no row index.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Print the first `max_rows` rows as a markdown table.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Write one JSON file per series under `dir`, creating the directory if
/// needed. Directory lifecycle lives here with the rendering side, not
/// in the pipeline. Returns the written paths.
pub fn write_chart_series(dir: &str, series: &[PerformanceSeries]) -> Result<Vec<String>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for s in series {
        let file_name = match &s.campaign {
            Some(campaign) => format!("{}_{}_campaign_performance.json", s.account, campaign),
            None => format!("{}_account_performance.json", s.account),
        };
        let path = Path::new(dir).join(file_name);
        let text = serde_json::to_string_pretty(s)?;
        fs::write(&path, text)?;
        written.push(path.display().to_string());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesPoint;
    use crate::types::AccountReportRow;

    fn sample_row() -> AccountReportRow {
        AccountReportRow {
            account: "Acme".into(),
            month: "2024-03".into(),
            clicks: "30".into(),
            impressions: "200".into(),
            ctr: "0.1500".into(),
            ctr_status: "Ok".into(),
            avg_cpc: "2.00".into(),
            cost: "60.00".into(),
            conversions: "3.00".into(),
            conv_rate: "0.1000".into(),
            conv_rate_status: "Ok".into(),
            cost_per_conv: "20.00".into(),
            cost_per_conv_status: "Ok".into(),
            search_imp_share: "0.5000".into(),
            budget_lost_imp_share: "0.1000".into(),
            budget_lost_top_imp_share: "0.1000".into(),
            budget_lost_abs_top_imp_share: "0.1000".into(),
            rank_lost_imp_share: "0.1000".into(),
            rank_lost_top_imp_share: "0.1000".into(),
            rank_lost_abs_top_imp_share: "0.1000".into(),
        }
    }

    #[test]
    fn test_write_csv_emits_header_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.csv");
        write_csv(path.to_str().unwrap(), &[sample_row()]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Account,YearMonth,Clicks,Impressions,CTR,CTR Status,Avg CPC,Cost,Conversions,\
Conv. Rate,Conv. Rate Status,Cost/Conv.,Cost/Conv. Status,Search Imp. Share,\
Search Budget Lost Imp Share,Search Budget Lost Top Imp Share,\
Search Budget Lost Abs Top Imp Share,Search Rank Lost Imp Share,\
Search Rank Lost Top Imp Share,Search Rank Lost Abs Top Imp Share"
        );
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_write_chart_series_creates_dir_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let charts = dir.path().join("charts");
        let series = vec![
            PerformanceSeries {
                account: "Acme".into(),
                campaign: None,
                points: vec![SeriesPoint {
                    month: "2024-03".into(),
                    clicks: 30.0,
                    conversions: 3.0,
                }],
            },
            PerformanceSeries {
                account: "Acme".into(),
                campaign: Some("Brand".into()),
                points: vec![],
            },
        ];
        let written = write_chart_series(charts.to_str().unwrap(), &series).unwrap();
        assert_eq!(written.len(), 2);
        assert!(charts.join("Acme_account_performance.json").exists());
        assert!(charts.join("Acme_Brand_campaign_performance.json").exists());
        let text =
            fs::read_to_string(charts.join("Acme_account_performance.json")).unwrap();
        assert!(text.contains("\"month\": \"2024-03\""));
        assert!(text.contains("\"clicks\": 30.0"));
    }
}
