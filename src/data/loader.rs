//! Read base game collections and server configurations from the data directory.
//! Layout: `<root>/base-game/{professions,skills,species}.json` and
//! `<root>/server-configs/<name>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use crate::data::error::{DataError, Result};
use crate::data::model::{Professions, ServerConfig, Skills, SpeciesMap};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const BASE_GAME_DIR: &str = "base-game";
pub const SERVER_CONFIGS_DIR: &str = "server-configs";
pub const DEFAULT_CONFIG_NAME: &str = "default";

pub const PROFESSIONS_FILE: &str = "professions.json";
pub const SKILLS_FILE: &str = "skills.json";
pub const SPECIES_FILE: &str = "species.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub base_game: PathBuf,
    pub server_configs: PathBuf,
}

impl DataPaths {
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        DataPaths {
            base_game: root.join(BASE_GAME_DIR),
            server_configs: root.join(SERVER_CONFIGS_DIR),
        }
    }

    pub fn config_file(&self, name: &str) -> PathBuf {
        self.server_configs.join(format!("{name}.json"))
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths::from_root(DEFAULT_DATA_DIR)
    }
}

/// The three base collections exactly as stored on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseDataset {
    pub professions: Professions,
    pub skills: Skills,
    pub species: SpeciesMap,
}

pub fn load_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all three base collections. Any missing or malformed file is an error.
pub fn load_base_dataset(base_game_dir: &Path) -> Result<BaseDataset> {
    let professions: Professions = load_json_file(base_game_dir.join(PROFESSIONS_FILE))?;
    info!(count = professions.len(), "loaded professions");

    let skills: Skills = load_json_file(base_game_dir.join(SKILLS_FILE))?;
    info!(count = skills.len(), "loaded skills");

    let species: SpeciesMap = load_json_file(base_game_dir.join(SPECIES_FILE))?;
    info!(count = species.len(), "loaded species");

    Ok(BaseDataset {
        professions,
        skills,
        species,
    })
}

/// Config names map straight onto file names, so only plain identifiers are accepted.
pub fn is_valid_config_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

pub fn load_server_config_file(paths: &DataPaths, name: &str) -> Result<ServerConfig> {
    if !is_valid_config_name(name) {
        return Err(DataError::InvalidConfigName(name.to_string()));
    }
    load_json_file(paths.config_file(name))
}

/// Names of every `*.json` file in the server-configs directory, sorted, without extension.
pub fn list_config_names(server_configs_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(server_configs_dir).map_err(|source| DataError::Io {
        path: server_configs_dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let file_name = file_name.to_str()?;
            file_name.strip_suffix(".json").map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}
