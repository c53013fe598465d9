//! In-memory game data for the server: base collections plus the active
//! server configuration with its overrides applied.
//!
//! Owned by the caller and shared behind a lock (see [crate::server::SharedService]).
//! Every mutation goes through `&mut self`, so a configuration switch and its
//! merge run under one write lock.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::data::error::{DataError, Result};
use crate::data::loader::{
    list_config_names, load_base_dataset, load_server_config_file, BaseDataset, DataPaths,
    DEFAULT_CONFIG_NAME,
};
use crate::data::model::{Profession, Professions, ServerConfig, Skill, Skills, SpeciesMap};
use crate::data::overrides::{apply_overrides, MergePolicy, OverrideReport};

#[derive(Debug, Default)]
pub struct DataService {
    paths: DataPaths,
    policy: MergePolicy,
    /// Untouched copy of the files on disk; only kept for [MergePolicy::ResetToBase].
    pristine: Option<BaseDataset>,
    current: BaseDataset,
    server_config: ServerConfig,
    active_config: Option<String>,
    loaded: bool,
}

impl DataService {
    pub fn new(paths: DataPaths) -> Self {
        DataService::with_policy(paths, MergePolicy::default())
    }

    pub fn with_policy(paths: DataPaths, policy: MergePolicy) -> Self {
        DataService {
            paths,
            policy,
            ..DataService::default()
        }
    }

    /// Load the base collections, then the `default` server configuration.
    /// Fails if any base file or the default configuration cannot be loaded.
    pub fn initialize(&mut self) -> Result<()> {
        info!(dir = %self.paths.base_game.display(), "loading game data");

        let base = load_base_dataset(&self.paths.base_game)?;
        self.pristine = match self.policy {
            MergePolicy::ResetToBase => Some(base.clone()),
            MergePolicy::Accumulate => None,
        };
        self.current = base;
        self.server_config = ServerConfig::default();
        self.active_config = None;

        self.load_server_config(DEFAULT_CONFIG_NAME)?;
        self.loaded = true;
        info!("all game data loaded");
        Ok(())
    }

    /// Activate the named configuration and apply its overrides.
    ///
    /// A configuration that is missing, malformed, or badly named is logged and
    /// replaced by `default`. Only a failure of `default` itself is returned.
    pub fn load_server_config(&mut self, name: &str) -> Result<OverrideReport> {
        match load_server_config_file(&self.paths, name) {
            Ok(config) => Ok(self.activate(name, config)),
            Err(err) if name != DEFAULT_CONFIG_NAME => {
                warn!(config = %name, error = %err, "could not load server config, using default");
                self.load_server_config(DEFAULT_CONFIG_NAME)
            }
            Err(err) => Err(DataError::ConfigUnavailable {
                name: name.to_string(),
                source: Box::new(err),
            }),
        }
    }

    fn activate(&mut self, name: &str, config: ServerConfig) -> OverrideReport {
        if let (MergePolicy::ResetToBase, Some(pristine)) = (self.policy, &self.pristine) {
            self.current.professions = pristine.professions.clone();
            self.current.skills = pristine.skills.clone();
        }

        let report = apply_overrides(
            &mut self.current.professions,
            &mut self.current.skills,
            &config,
        );
        info!(
            config = %name,
            skills_patched = report.skills_patched.len(),
            professions_disabled = report.professions_disabled.len(),
            ignored = report.unknown_skills.len() + report.unknown_professions.len(),
            "loaded server config"
        );

        self.server_config = config;
        self.active_config = Some(name.to_string());
        report
    }

    /// All professions, or only those not disabled by the active configuration.
    pub fn professions(&self, include_disabled: bool) -> BTreeMap<&str, &Profession> {
        self.current
            .professions
            .iter()
            .filter(|(_, profession)| include_disabled || !profession.disabled)
            .map(|(id, profession)| (id.as_str(), profession))
            .collect()
    }

    pub fn all_professions(&self) -> &Professions {
        &self.current.professions
    }

    pub fn profession(&self, id: &str) -> Option<&Profession> {
        self.current.professions.get(id)
    }

    pub fn skills(&self) -> &Skills {
        &self.current.skills
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.current.skills.get(id)
    }

    pub fn species(&self) -> &SpeciesMap {
        &self.current.species
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.server_config
    }

    /// Name of the configuration actually in effect, after any fallback.
    pub fn active_config_name(&self) -> Option<&str> {
        self.active_config.as_deref()
    }

    /// Configuration names available on disk. Falls back to `["default"]` when
    /// the directory cannot be read.
    pub fn available_configs(&self) -> Vec<String> {
        match list_config_names(&self.paths.server_configs) {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "failed to list server configs");
                vec![DEFAULT_CONFIG_NAME.to_string()]
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Discard everything and load again from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.loaded = false;
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_service_is_empty_and_not_loaded() {
        let service = DataService::new(DataPaths::from_root("/nonexistent/holonet"));
        assert!(!service.is_loaded());
        assert!(service.professions(true).is_empty());
        assert!(service.skills().is_empty());
        assert!(service.species().is_empty());
        assert!(service.active_config_name().is_none());
    }

    #[test]
    fn initialize_without_files_fails_and_stays_unloaded() {
        let mut service = DataService::new(DataPaths::from_root("/nonexistent/holonet"));
        let err = service.initialize().expect_err("missing base data should fail");
        assert!(matches!(err, DataError::Io { .. }));
        assert!(!service.is_loaded());
    }

    #[test]
    fn available_configs_defaults_when_directory_missing() {
        let service = DataService::new(DataPaths::from_root("/nonexistent/holonet"));
        assert_eq!(service.available_configs(), vec!["default".to_string()]);
    }
}
