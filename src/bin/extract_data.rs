//! Convert the legacy constants dump into data/base-game/*.json and
//! data/server-configs/default.json.
//! Run: cargo run --bin extract_data [source] [data-dir]

use std::path::Path;

use holonet::data::extract::{read_legacy_constants, Extraction, DEFAULT_LEGACY_SOURCE};
use holonet::data::loader::DEFAULT_DATA_DIR;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let source = args.get(1).map(String::as_str).unwrap_or(DEFAULT_LEGACY_SOURCE);
    let data_dir = args.get(2).map(String::as_str).unwrap_or(DEFAULT_DATA_DIR);

    println!("Reading legacy constants from {source}");
    let constants = match read_legacy_constants(Path::new(source)) {
        Ok(constants) => constants,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            eprintln!("Make sure the constants file exists and each export is a JSON literal");
            std::process::exit(1);
        }
    };

    let extraction = Extraction::from_legacy(&constants);
    let summary = extraction.write_to(Path::new(data_dir), source)?;

    println!(
        "Extracted {} professions, {} skills, {} species into {data_dir}",
        summary.profession_count, summary.skill_count, summary.species_count
    );
    for file in &summary.files_created {
        println!("  wrote {file}");
    }
    Ok(())
}
