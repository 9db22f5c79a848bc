// Entry point and high-level CLI flow.
//
// - Option [1] loads and cleans the exported CSV, printing diagnostics.
// - Option [2] generates the account- and campaign-level tables, writes
//   both download files, prints previews, and exports the chart series.
// - After generating reports, the user can choose to go back to the
//   selection menu or exit.
mod error;
mod loader;
mod output;
mod reports;
mod schema;
mod series;
mod types;
mod util;

use once_cell::sync::Lazy;
use reports::GroupShape;
use std::io::{self, Write};
use std::sync::Mutex;
use types::CanonicalRow;

// Simple in-memory app state so we only load/clean the CSV once but can
// generate reports multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<CanonicalRow>>,
}

const DEFAULT_INPUT: &str = "google_ads_export.csv";
const ACCOUNT_CSV: &str = "account_level_data.csv";
const CAMPAIGN_CSV: &str = "campaign_level_data.csv";
const CHARTS_DIR: &str = "charts";

/// Read a single line of input after printing the common "Enter choice:"
/// prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask for the CSV path, falling back to the default export name.
fn read_path() -> String {
    print!("CSV file path [{}]: ", DEFAULT_INPUT);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    let path = buf.trim();
    if path.is_empty() {
        DEFAULT_INPUT.to_string()
    } else {
        path.to_string()
    }
}

/// Ask the user whether to go back to the report selection menu after
/// generating reports.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and clean the CSV export.
///
/// On success the rows are stored in `APP_STATE` and a short summary of
/// the load is printed. A schema error (missing required columns) fails
/// here, before any aggregation can run.
fn handle_load() {
    let path = read_path();
    match loader::load_and_clean(&path) {
        Ok((data, report)) => {
            println!(
                "Processing export... ({} rows read, {} kept)",
                util::format_int(report.total_rows),
                util::format_int(report.kept_rows)
            );
            if report.rejected_rows > 0 {
                println!(
                    "Note: {} rows dropped (unreadable record or invalid date).",
                    util::format_int(report.rejected_rows)
                );
            }
            if report.defaulted_values > 0 {
                println!(
                    "Info: {} numeric values could not be parsed and were set to 0.",
                    util::format_int(report.defaulted_values)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: generate both report tables and the chart feeds.
///
/// Both tables are assembled in memory before anything is written, so a
/// failure never leaves one download without the other.
fn handle_generate_reports() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV export first (option 1).\n");
        return;
    };

    println!("Generating reports...\n");

    let account_aggs = reports::aggregate(&data, GroupShape::Account);
    let campaign_aggs = reports::aggregate(&data, GroupShape::Campaign);
    let account_rows = reports::account_report(&account_aggs);
    let campaign_rows = reports::campaign_report(&campaign_aggs);

    if let Err(e) = output::write_csv(ACCOUNT_CSV, &account_rows) {
        eprintln!("Write error: {}", e);
        return;
    }
    if let Err(e) = output::write_csv(CAMPAIGN_CSV, &campaign_rows) {
        eprintln!("Write error: {}", e);
        return;
    }

    println!("Account Level Table");
    output::preview_table_rows(&account_rows, 5);
    println!("(Full table exported to {})\n", ACCOUNT_CSV);

    println!("Campaign Level Table");
    output::preview_table_rows(&campaign_rows, 5);
    println!("(Full table exported to {})\n", CAMPAIGN_CSV);

    let mut all_series = series::build_series(&account_aggs);
    all_series.extend(series::build_series(&campaign_aggs));
    match output::write_chart_series(CHARTS_DIR, &all_series) {
        Ok(files) => println!(
            "Chart data: {} series exported to {}/.\n",
            util::format_int(files.len()),
            CHARTS_DIR
        ),
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn main() {
    loop {
        println!("Google Ads Account and Campaign Performance Report");
        println!("[1] Load the CSV export");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
