use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::data::validate::{validate_dataset, Severity};
use crate::data::{DataPaths, DataService};
use crate::server;

const USAGE: &str = "usage: holonet <serve|validate|configs> [data-dir]";
const DEFAULT_LOG_FILTER: &str = "holonet=info,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Validate,
    Configs,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("validate") => Some(Command::Validate),
        Some("configs") => Some(Command::Configs),
        _ => None,
    }
}

/// Install the fmt subscriber, honouring RUST_LOG. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Configs) => handle_configs(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn data_dir_arg(args: &[String]) -> PathBuf {
    args.get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| AppConfig::from_env().data_dir)
}

fn handle_serve() -> i32 {
    let config = AppConfig::from_env();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    match runtime.block_on(server::run_server(&config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let data_dir = data_dir_arg(args);
    let report = validate_dataset(&DataPaths::from_root(&data_dir));

    for finding in &report.findings {
        match finding.severity {
            Severity::Info => println!("{finding}"),
            _ => eprintln!("{finding}"),
        }
    }

    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s)",
            report.count(Severity::Error),
            report.count(Severity::Warning)
        );
        1
    } else {
        println!(
            "validation passed: {} ({} warning(s))",
            data_dir.display(),
            report.count(Severity::Warning)
        );
        0
    }
}

fn handle_configs(args: &[String]) -> i32 {
    let service = DataService::new(DataPaths::from_root(data_dir_arg(args)));
    for name in service.available_configs() {
        println!("{name}");
    }
    0
}
