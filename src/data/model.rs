//! Base game records and the server configuration schema.
//! Field names follow the camelCase JSON written by the extractor.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type Professions = BTreeMap<String, Profession>;
pub type Skills = BTreeMap<String, Skill>;
pub type SpeciesMap = BTreeMap<String, Species>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque tree layout consumed by the frontend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tree: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skill_points: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub skill_modifiers: BTreeMap<String, f64>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub schematics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Partial skill update carried by a server configuration. Absent fields keep
/// the current value; present fields replace it wholesale (lists and maps
/// included). Keys outside this set are dropped at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub skill_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_modifiers: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematics: Option<Vec<String>>,
}

impl SkillPatch {
    pub fn apply_to(&self, skill: &mut Skill) {
        if let Some(title) = &self.title {
            skill.title = title.clone();
        }
        if let Some(points) = self.skill_points {
            skill.skill_points = points;
        }
        if let Some(prerequisites) = &self.prerequisites {
            skill.prerequisites = prerequisites.clone();
        }
        if let Some(experience) = &self.experience {
            skill.experience = experience.clone();
        }
        if let Some(modifiers) = &self.skill_modifiers {
            skill.skill_modifiers = modifiers.clone();
        }
        if let Some(commands) = &self.commands {
            skill.commands = commands.clone();
        }
        if let Some(schematics) = &self.schematics {
            skill.schematics = schematics.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionOverrides {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_professions: Vec<String>,
}

pub const DEFAULT_MAX_SKILL_POINTS: u32 = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default = "default_max_skill_points", deserialize_with = "lenient_u32")]
    pub max_skill_points: u32,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub max_professions: Option<u32>,
    #[serde(default = "default_experience_multiplier")]
    pub experience_multiplier: f64,
    #[serde(default = "default_true")]
    pub enable_all_professions: bool,
    #[serde(default = "default_true")]
    pub enable_all_species: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            max_skill_points: DEFAULT_MAX_SKILL_POINTS,
            max_professions: None,
            experience_multiplier: 1.0,
            enable_all_professions: true,
            enable_all_species: true,
            extra: Map::new(),
        }
    }
}

fn default_max_skill_points() -> u32 {
    DEFAULT_MAX_SKILL_POINTS
}

fn default_experience_multiplier() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationFeatures {
    #[serde(default = "default_true")]
    pub save_builds: bool,
    #[serde(default = "default_true")]
    pub export_builds: bool,
    #[serde(default)]
    pub share_builds: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<CustomizationFeatures>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any non-negative finite number that fits in a `u32`; floats such as `300.0` are rounded.
pub(crate) fn number_to_u32(value: &Value) -> Option<u32> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.round() as u64)?,
    };
    u32::try_from(n).ok()
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    number_to_u32(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative count, got {value}")))
}

fn lenient_opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => number_to_u32(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a non-negative count, got {value}"))),
    }
}

/// A named bundle of settings and overrides, loaded from
/// `server-configs/<name>.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub settings: ServerSettings,
    #[serde(default)]
    pub skill_overrides: BTreeMap<String, SkillPatch>,
    #[serde(default)]
    pub profession_overrides: ProfessionOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
    /// Unrecognized keys, here and in the nested settings, are echoed back by `/api/config`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifleman() -> Skill {
        serde_json::from_str(
            r#"{
                "id": "combat_rifleman_novice",
                "title": "Novice Rifleman",
                "skillPoints": 4,
                "prerequisites": ["combat_marksman_novice"],
                "experience": {"type": "combat_rifle", "cost": 1000},
                "skillModifiers": {"rifle_accuracy": 5},
                "commands": ["cert_rifle_t21"],
                "schematics": []
            }"#,
        )
        .expect("fixture skill should parse")
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let mut skill = rifleman();
        let patch: SkillPatch = serde_json::from_str(r#"{"skillPoints": 1}"#).unwrap();
        patch.apply_to(&mut skill);

        let mut expected = rifleman();
        expected.skill_points = 1;
        assert_eq!(skill, expected);
    }

    #[test]
    fn patch_replaces_lists_instead_of_appending() {
        let mut skill = rifleman();
        let patch: SkillPatch =
            serde_json::from_str(r#"{"commands": ["a"], "skillModifiers": {}}"#).unwrap();
        patch.apply_to(&mut skill);
        assert_eq!(skill.commands, vec!["a".to_string()]);
        assert!(skill.skill_modifiers.is_empty());
        assert_eq!(skill.prerequisites, vec!["combat_marksman_novice".to_string()]);
    }

    #[test]
    fn patch_ignores_unknown_keys_and_id() {
        let patch: SkillPatch =
            serde_json::from_str(r#"{"id": "other", "bogus": 3, "title": "Renamed"}"#).unwrap();
        let mut skill = rifleman();
        patch.apply_to(&mut skill);
        assert_eq!(skill.id, "combat_rifleman_novice");
        assert_eq!(skill.title, "Renamed");
    }

    #[test]
    fn server_config_defaults_and_extra_keys() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"serverName": "Legends", "motd": "hi"}"#).unwrap();
        assert_eq!(config.settings.max_skill_points, DEFAULT_MAX_SKILL_POINTS);
        assert_eq!(config.settings.experience_multiplier, 1.0);
        assert!(config.skill_overrides.is_empty());
        assert!(config.profession_overrides.disabled_professions.is_empty());
        assert_eq!(config.extra.get("motd"), Some(&Value::from("hi")));

        let echoed = serde_json::to_value(&config).unwrap();
        assert_eq!(echoed["motd"], "hi");
        assert_eq!(echoed["settings"]["maxProfessions"], Value::Null);
    }

    #[test]
    fn nested_unknown_keys_survive_a_round_trip() {
        let config: ServerConfig = serde_json::from_str(
            r#"{
                "settings": {"maxSkillPoints": 300, "maxLevel": 90},
                "customization": {
                    "title": "Legends",
                    "theme": "dark",
                    "logo": "l.png",
                    "features": {"saveBuilds": false, "printBuilds": true}
                }
            }"#,
        )
        .unwrap();

        let echoed = serde_json::to_value(&config).unwrap();
        assert_eq!(echoed["settings"]["maxSkillPoints"], 300);
        assert_eq!(echoed["settings"]["maxLevel"], 90);
        assert_eq!(echoed["customization"]["logo"], "l.png");
        assert_eq!(echoed["customization"]["features"]["saveBuilds"], false);
        assert_eq!(echoed["customization"]["features"]["printBuilds"], true);
    }

    #[test]
    fn whole_number_floats_load_as_counts() {
        let config: ServerConfig = serde_json::from_str(
            r#"{
                "settings": {"maxSkillPoints": 300.0, "maxProfessions": 3.0},
                "skillOverrides": {"combat_rifleman_novice": {"skillPoints": 2.0}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.settings.max_skill_points, 300);
        assert_eq!(config.settings.max_professions, Some(3));
        assert_eq!(
            config.skill_overrides["combat_rifleman_novice"].skill_points,
            Some(2)
        );

        let nulls: ServerSettings = serde_json::from_str(r#"{"maxProfessions": null}"#).unwrap();
        assert_eq!(nulls.max_professions, None);
        assert_eq!(nulls.max_skill_points, DEFAULT_MAX_SKILL_POINTS);

        assert!(serde_json::from_str::<ServerSettings>(r#"{"maxSkillPoints": -5}"#).is_err());
        assert!(serde_json::from_str::<ServerSettings>(r#"{"maxSkillPoints": "lots"}"#).is_err());
    }

    #[test]
    fn disabled_flag_only_serialized_when_set() {
        let mut profession = Profession {
            id: "jedi_lightsaber".to_string(),
            display_name: "Lightsaber".to_string(),
            category: "jedi".to_string(),
            description: None,
            skill_tree: None,
            disabled: false,
        };
        let value = serde_json::to_value(&profession).unwrap();
        assert!(value.get("disabled").is_none());

        profession.disabled = true;
        let value = serde_json::to_value(&profession).unwrap();
        assert_eq!(value["disabled"], true);
    }
}
