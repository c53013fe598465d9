//! Validate base game data and server configs: ids, prerequisites, override targets.
//! Run: cargo run --bin validate_data [data-dir]

use std::path::Path;

use holonet::data::loader::DEFAULT_DATA_DIR;
use holonet::data::validate::{validate_dataset, Severity};
use holonet::data::DataPaths;

fn main() {
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
    let report = validate_dataset(&DataPaths::from_root(Path::new(&data_dir)));

    for finding in &report.findings {
        println!("{finding}");
    }
    println!(
        "Validated {data_dir}: {} errors, {} warnings",
        report.count(Severity::Error),
        report.count(Severity::Warning)
    );
    if report.has_errors() {
        std::process::exit(1);
    }
}
