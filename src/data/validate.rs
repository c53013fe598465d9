//! Offline checks over a data directory, used by `holonet validate` and the
//! `validate_data` binary.

use std::fmt;

use crate::data::loader::{
    list_config_names, load_base_dataset, load_server_config_file, BaseDataset, DataPaths,
    DEFAULT_CONFIG_NAME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// One problem (or note) found in the data directory. `location` is a
/// dotted path such as `skills.combat_rifleman_novice.prerequisites`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetReport {
    pub findings: Vec<Finding>,
}

impl DatasetReport {
    fn add(&mut self, severity: Severity, location: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            severity,
            location: location.into(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.add(Severity::Error, location, message);
    }

    pub fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.add(Severity::Warning, location, message);
    }

    pub fn info(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.add(Severity::Info, location, message);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// Check the base collections and every server configuration under `paths`.
pub fn validate_dataset(paths: &DataPaths) -> DatasetReport {
    let mut report = DatasetReport::default();

    let base = match load_base_dataset(&paths.base_game) {
        Ok(base) => base,
        Err(err) => {
            report.error("base-game", err.to_string());
            return report;
        }
    };
    report.info(
        "base-game",
        format!(
            "{} professions, {} skills, {} species",
            base.professions.len(),
            base.skills.len(),
            base.species.len()
        ),
    );
    check_base_dataset(&base, &mut report);
    check_server_configs(paths, &base, &mut report);
    report
}

fn check_ids<'a>(
    collection: &str,
    entries: impl IntoIterator<Item = (&'a String, &'a str)>,
    report: &mut DatasetReport,
) {
    for (key, id) in entries {
        if key.as_str() != id {
            report.error(format!("{collection}.{key}"), format!("key does not match id '{id}'"));
        }
    }
}

pub fn check_base_dataset(base: &BaseDataset, report: &mut DatasetReport) {
    check_ids(
        "professions",
        base.professions.iter().map(|(k, p)| (k, p.id.as_str())),
        report,
    );
    check_ids("species", base.species.iter().map(|(k, s)| (k, s.id.as_str())), report);
    check_ids("skills", base.skills.iter().map(|(k, s)| (k, s.id.as_str())), report);

    for (key, skill) in &base.skills {
        for prerequisite in skill
            .prerequisites
            .iter()
            .filter(|p| !base.skills.contains_key(*p))
        {
            report.warning(
                format!("skills.{key}.prerequisites"),
                format!("unknown skill '{prerequisite}'"),
            );
        }
    }
}

fn check_server_configs(paths: &DataPaths, base: &BaseDataset, report: &mut DatasetReport) {
    let names = match list_config_names(&paths.server_configs) {
        Ok(names) => names,
        Err(err) => {
            report.warning("server-configs", err.to_string());
            return;
        }
    };
    if !names.iter().any(|name| name == DEFAULT_CONFIG_NAME) {
        report.warning("server-configs", "default.json is missing");
    }

    for name in &names {
        let config = match load_server_config_file(paths, name) {
            Ok(config) => config,
            Err(err) => {
                report.warning(format!("server-configs.{name}"), err.to_string());
                continue;
            }
        };
        for skill_id in config.skill_overrides.keys().filter(|id| !base.skills.contains_key(*id)) {
            report.warning(
                format!("server-configs.{name}.skillOverrides"),
                format!("unknown skill '{skill_id}' will be ignored"),
            );
        }
        for profession_id in config
            .profession_overrides
            .disabled_professions
            .iter()
            .filter(|id| !base.professions.contains_key(*id))
        {
            report.warning(
                format!("server-configs.{name}.professionOverrides"),
                format!("unknown profession '{profession_id}' will be ignored"),
            );
        }
    }
}
