//! Convert a legacy constants dump into the base-game JSON files and a
//! default server configuration. Used by the `extract_data` binary.
//!
//! The legacy file is either one JSON object or a series of
//! `export const NAME = <json>;` statements. Recognized constants:
//! `PROFESSIONS`, `ALL_PROFESSIONS`, `SKILLS`, `SKILL_TITLE`, `ALL_SPECIES`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::data::loader::{
    BASE_GAME_DIR, PROFESSIONS_FILE, SERVER_CONFIGS_DIR, SKILLS_FILE, SPECIES_FILE,
};
use crate::data::model::{
    number_to_u32, Customization, CustomizationFeatures, Experience, Profession, Professions, ServerConfig,
    ServerSettings, Skill, Skills, Species, SpeciesMap,
};
use crate::data::normalize::{last_segment, normalize_id, species_display_name, title_case_from_key};

pub const DEFAULT_LEGACY_SOURCE: &str = "archive/CONSTANTS.js";
pub const SUMMARY_FILE: &str = "extraction-summary.json";
const EXPORT_CONST: &str = "export const ";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("legacy constants not found at {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("constant {name} is not valid JSON: {source}")]
    Constant {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("legacy constants have an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LegacyConstants {
    /// Category -> profession display names, in source order.
    #[serde(default)]
    pub professions: Option<Map<String, Value>>,
    #[serde(default)]
    pub all_professions: Option<Map<String, Value>>,
    #[serde(default)]
    pub skills: Option<Map<String, Value>>,
    #[serde(default)]
    pub skill_title: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub all_species: Option<Vec<String>>,
}

pub fn parse_legacy_constants(source: &str) -> Result<LegacyConstants, ExtractError> {
    let trimmed = source.trim_start();
    let object = if trimmed.starts_with('{') {
        serde_json::from_str::<Value>(trimmed).map_err(|source| ExtractError::Constant {
            name: "<root>".to_string(),
            source,
        })?
    } else {
        Value::Object(parse_export_statements(source)?)
    };
    serde_json::from_value(object).map_err(ExtractError::Shape)
}

fn parse_export_statements(source: &str) -> Result<Map<String, Value>, ExtractError> {
    let mut constants = Map::new();
    let mut chunks = source.split(EXPORT_CONST);
    chunks.next();

    for chunk in chunks {
        let Some((name, rest)) = chunk.split_once('=') else {
            continue;
        };
        let name = name.trim().to_string();
        let literal = rest.trim().trim_end_matches(';').trim_end();
        let value = serde_json::from_str(literal).map_err(|source| ExtractError::Constant {
            name: name.clone(),
            source,
        })?;
        constants.insert(name, value);
    }
    Ok(constants)
}

pub fn extract_professions(data: &LegacyConstants) -> Professions {
    // Source order matters for skill-tree matching below.
    let mut ordered: Vec<Profession> = Vec::new();

    for (category, names) in data.professions.iter().flatten() {
        let names = names.as_array().map(Vec::as_slice).unwrap_or_default();
        for name in names.iter().filter_map(Value::as_str) {
            let id = normalize_id(name);
            let profession = Profession {
                id: id.clone(),
                display_name: name.to_string(),
                category: category.clone(),
                description: Some(format!("{name} profession from Star Wars Galaxies")),
                skill_tree: None,
                disabled: false,
            };
            match ordered.iter_mut().find(|p| p.id == id) {
                Some(existing) => *existing = profession,
                None => ordered.push(profession),
            }
        }
    }

    for (tree_key, tree) in data.all_professions.iter().flatten() {
        let suffix = last_segment(tree_key);
        let matched = ordered
            .iter_mut()
            .find(|p| tree_key.contains(p.id.as_str()) || p.id.contains(suffix));

        match matched {
            Some(profession) => profession.skill_tree = Some(tree.clone()),
            None => ordered.push(Profession {
                id: tree_key.clone(),
                display_name: title_case_from_key(tree_key),
                category: "unknown".to_string(),
                description: None,
                skill_tree: Some(tree.clone()),
                disabled: false,
            }),
        }
    }

    ordered.into_iter().map(|p| (p.id.clone(), p)).collect()
}

pub fn extract_skills(data: &LegacyConstants) -> Skills {
    let titles = data.skill_title.as_ref();
    let empty = Map::new();
    data.skills
        .iter()
        .flatten()
        .map(|(skill_id, raw)| {
            let fields = raw.as_object().unwrap_or_else(|| {
                warn!(skill = %skill_id, "legacy skill is not an object, using defaults");
                &empty
            });
            let legacy = LegacyFields { skill_id, fields };

            let title = legacy
                .get::<String>("title")
                .filter(|title| !title.is_empty())
                .or_else(|| titles.and_then(|t| t.get(skill_id)).cloned())
                .unwrap_or_default();
            let skill = Skill {
                id: skill_id.clone(),
                title,
                skill_points: legacy.count("skillPoints").unwrap_or(0),
                prerequisites: legacy.get("preReqs").unwrap_or_default(),
                experience: legacy.get::<Experience>("xp").unwrap_or_default(),
                skill_modifiers: legacy.get("skillModifiers").unwrap_or_default(),
                commands: legacy.get("commands").unwrap_or_default(),
                schematics: legacy.get("schematics").unwrap_or_default(),
            };
            (skill_id.clone(), skill)
        })
        .collect()
}

/// Field-by-field view of one legacy skill. A mistyped field is logged and
/// treated as absent; the remaining fields still come through.
struct LegacyFields<'a> {
    skill_id: &'a str,
    fields: &'a Map<String, Value>,
}

impl LegacyFields<'_> {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.fields.get(key).filter(|v| !v.is_null())?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(skill = %self.skill_id, field = key, error = %err, "ignoring mistyped legacy skill field");
                None
            }
        }
    }

    fn count(&self, key: &str) -> Option<u32> {
        let value = self.fields.get(key).filter(|v| !v.is_null())?;
        let count = number_to_u32(value);
        if count.is_none() {
            warn!(skill = %self.skill_id, field = key, value = %value, "ignoring mistyped legacy skill field");
        }
        count
    }
}

pub fn extract_species(data: &LegacyConstants) -> SpeciesMap {
    data.all_species
        .iter()
        .flatten()
        .map(|id| {
            let species = Species {
                id: id.clone(),
                display_name: species_display_name(id),
                description: format!("{id} species from Star Wars Galaxies"),
            };
            (id.clone(), species)
        })
        .collect()
}

pub fn default_server_config() -> ServerConfig {
    ServerConfig {
        server_name: Some("Default SWG Configuration".to_string()),
        description: Some("Base Star Wars Galaxies skill calculator settings".to_string()),
        version: Some("1.0.0".to_string()),
        settings: ServerSettings::default(),
        skill_overrides: BTreeMap::new(),
        profession_overrides: Default::default(),
        customization: Some(Customization {
            title: "SWG Skill Calculator".to_string(),
            theme: "classic".to_string(),
            features: Some(CustomizationFeatures {
                save_builds: true,
                export_builds: true,
                share_builds: false,
                extra: Map::new(),
            }),
            extra: Map::new(),
        }),
        extra: Map::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub extraction_date: String,
    pub source_file: String,
    pub profession_count: usize,
    pub skill_count: usize,
    pub species_count: usize,
    pub files_created: Vec<String>,
}

/// Everything the extractor writes, built in memory first.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub professions: Professions,
    pub skills: Skills,
    pub species: SpeciesMap,
    pub default_config: ServerConfig,
}

impl Extraction {
    pub fn from_legacy(data: &LegacyConstants) -> Self {
        Extraction {
            professions: extract_professions(data),
            skills: extract_skills(data),
            species: extract_species(data),
            default_config: default_server_config(),
        }
    }

    /// Write the base-game files, `server-configs/default.json`, and the summary under `data_dir`.
    pub fn write_to(&self, data_dir: &Path, source_file: &str) -> Result<ExtractionSummary, ExtractError> {
        let base_game = data_dir.join(BASE_GAME_DIR);
        let configs = data_dir.join(SERVER_CONFIGS_DIR);

        write_json(&base_game.join(PROFESSIONS_FILE), "professions", &self.professions)?;
        write_json(&base_game.join(SKILLS_FILE), "skills", &self.skills)?;
        write_json(&base_game.join(SPECIES_FILE), "species", &self.species)?;
        write_json(&configs.join("default.json"), "default config", &self.default_config)?;

        let summary = ExtractionSummary {
            extraction_date: chrono::Utc::now().to_rfc3339(),
            source_file: source_file.to_string(),
            profession_count: self.professions.len(),
            skill_count: self.skills.len(),
            species_count: self.species.len(),
            files_created: vec![
                format!("data/{BASE_GAME_DIR}/{PROFESSIONS_FILE}"),
                format!("data/{BASE_GAME_DIR}/{SKILLS_FILE}"),
                format!("data/{BASE_GAME_DIR}/{SPECIES_FILE}"),
                format!("data/{SERVER_CONFIGS_DIR}/default.json"),
            ],
        };
        write_json(&base_game.join(SUMMARY_FILE), "summary", &summary)?;
        Ok(summary)
    }
}

pub fn read_legacy_constants(path: &Path) -> Result<LegacyConstants, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::SourceMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_legacy_constants(&raw)
}

fn write_json<T: Serialize>(path: &Path, name: &'static str, value: &T) -> Result<(), ExtractError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| ExtractError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let payload = serde_json::to_string_pretty(value)
        .map_err(|source| ExtractError::Serialize { name, source })?;
    fs::write(path, payload).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"
export const PROFESSIONS = {"combat": ["Rifleman", "Bio-Engineer"], "jedi": ["Lightsaber"]};
export const ALL_PROFESSIONS = {"combat_rifleman": {"tree": 1}, "force_sensitive_combat": {"tree": 2}};
export const SKILLS = {
  "combat_rifleman_novice": {"skillPoints": 4, "preReqs": ["combat_marksman_novice"], "xp": {"type": "combat_rifle", "cost": 1000}},
  "combat_rifleman_master": {"title": "Master Rifleman", "skillPoints": 6}
};
export const SKILL_TITLE = {"combat_rifleman_novice": "Novice Rifleman"};
export const ALL_SPECIES = ["human", "mon_calamari"];
export const UNUSED = 5;
"#;

    #[test]
    fn export_statements_parse_into_constants() {
        let data = parse_legacy_constants(LEGACY).expect("legacy fixture should parse");
        assert_eq!(data.professions.as_ref().map(Map::len), Some(2));
        assert_eq!(data.all_species, Some(vec!["human".to_string(), "mon_calamari".to_string()]));
    }

    #[test]
    fn bad_constant_names_the_offender() {
        let err = parse_legacy_constants("export const SKILLS = {oops};").unwrap_err();
        assert!(err.to_string().contains("SKILLS"));
    }

    #[test]
    fn professions_get_ids_categories_and_trees() {
        let data = parse_legacy_constants(LEGACY).unwrap();
        let professions = extract_professions(&data);

        let rifleman = &professions["rifleman"];
        assert_eq!(rifleman.category, "combat");
        assert_eq!(rifleman.skill_tree, Some(serde_json::json!({"tree": 1})));
        assert_eq!(
            rifleman.description.as_deref(),
            Some("Rifleman profession from Star Wars Galaxies")
        );
        assert!(professions.contains_key("bio_engineer"));

        let orphan = &professions["force_sensitive_combat"];
        assert_eq!(orphan.display_name, "Force Sensitive Combat");
        assert_eq!(orphan.category, "unknown");
        assert!(orphan.description.is_none());
    }

    #[test]
    fn skills_fill_titles_and_defaults() {
        let data = parse_legacy_constants(LEGACY).unwrap();
        let skills = extract_skills(&data);

        let novice = &skills["combat_rifleman_novice"];
        assert_eq!(novice.title, "Novice Rifleman");
        assert_eq!(novice.skill_points, 4);
        assert_eq!(novice.prerequisites, vec!["combat_marksman_novice".to_string()]);
        assert_eq!(novice.experience.kind, "combat_rifle");

        let master = &skills["combat_rifleman_master"];
        assert_eq!(master.title, "Master Rifleman");
        assert!(master.commands.is_empty());
        assert_eq!(master.experience, Experience::default());
    }

    #[test]
    fn one_mistyped_skill_field_keeps_the_rest() {
        let data = parse_legacy_constants(
            r#"{"SKILLS": {"s1": {
                "title": "Novice",
                "skillPoints": 4,
                "preReqs": ["p"],
                "commands": ["a", 1],
                "xp": {"type": "combat_rifle", "cost": 10}
            }}}"#,
        )
        .unwrap();
        let skills = extract_skills(&data);

        let s1 = &skills["s1"];
        assert_eq!(s1.title, "Novice");
        assert_eq!(s1.skill_points, 4);
        assert_eq!(s1.prerequisites, vec!["p".to_string()]);
        assert_eq!(s1.experience.kind, "combat_rifle");
        assert!(s1.commands.is_empty());
    }

    #[test]
    fn float_skill_points_round_and_non_objects_default() {
        let data = parse_legacy_constants(
            r#"{"SKILLS": {"s1": {"skillPoints": 6.0}, "s2": "junk"},
                "SKILL_TITLE": {"s2": "Junk Skill"}}"#,
        )
        .unwrap();
        let skills = extract_skills(&data);

        assert_eq!(skills["s1"].skill_points, 6);
        assert_eq!(skills["s2"].title, "Junk Skill");
        assert_eq!(skills["s2"].skill_points, 0);
    }

    #[test]
    fn species_names_are_derived_from_ids() {
        let data = parse_legacy_constants(LEGACY).unwrap();
        let species = extract_species(&data);
        assert_eq!(species["mon_calamari"].display_name, "Mon calamari");
        assert_eq!(
            species["human"].description,
            "human species from Star Wars Galaxies"
        );
    }

    #[test]
    fn plain_json_source_is_accepted() {
        let data = parse_legacy_constants(r#"{"ALL_SPECIES": ["wookiee"]}"#).unwrap();
        assert_eq!(extract_species(&data).len(), 1);
        assert!(extract_professions(&data).is_empty());
        assert!(extract_skills(&data).is_empty());
    }

    #[test]
    fn default_config_matches_expected_shape() {
        let value = serde_json::to_value(default_server_config()).unwrap();
        assert_eq!(value["settings"]["maxSkillPoints"], 250);
        assert_eq!(value["settings"]["maxProfessions"], Value::Null);
        assert_eq!(value["customization"]["features"]["shareBuilds"], false);
        assert_eq!(value["skillOverrides"], serde_json::json!({}));
    }
}
