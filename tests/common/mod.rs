#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use holonet::data::{DataPaths, DataService, MergePolicy};

pub fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("holonet-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

pub const PROFESSIONS: &str = r#"{
  "combat_rifleman": {"id": "combat_rifleman", "displayName": "Rifleman", "category": "combat", "description": "Rifleman profession from Star Wars Galaxies"},
  "jedi_lightsaber": {"id": "jedi_lightsaber", "displayName": "Lightsaber", "category": "jedi", "description": "Lightsaber profession from Star Wars Galaxies"},
  "science_medic": {"id": "science_medic", "displayName": "Medic", "category": "science", "description": "Heals wounds in the field"}
}"#;

pub const SKILLS: &str = r#"{
  "combat_rifleman_novice": {"id": "combat_rifleman_novice", "title": "Novice Rifleman", "skillPoints": 2, "prerequisites": [], "experience": {"type": "combat_rifle", "cost": 0}, "skillModifiers": {"rifle_accuracy": 5}, "commands": ["cert_rifle_t21"], "schematics": []},
  "combat_rifleman_master": {"id": "combat_rifleman_master", "title": "Master Rifleman", "skillPoints": 4, "prerequisites": ["combat_rifleman_novice"], "experience": {"type": "combat_rifle", "cost": 300000}, "skillModifiers": {}, "commands": [], "schematics": []},
  "science_medic_novice": {"id": "science_medic_novice", "title": "Novice Medic", "skillPoints": 6, "prerequisites": [], "experience": {"type": "medical", "cost": 0}, "skillModifiers": {}, "commands": ["healdamage"], "schematics": ["stimpack_a"]}
}"#;

pub const SPECIES: &str = r#"{
  "human": {"id": "human", "displayName": "Human", "description": "human species from Star Wars Galaxies"},
  "mon_calamari": {"id": "mon_calamari", "displayName": "Mon calamari", "description": "mon_calamari species from Star Wars Galaxies"}
}"#;

pub const DEFAULT_CONFIG: &str = r#"{
  "serverName": "Default SWG Configuration",
  "description": "Base settings",
  "version": "1.0.0",
  "settings": {"maxSkillPoints": 250, "maxProfessions": null, "experienceMultiplier": 1.0, "enableAllProfessions": true, "enableAllSpecies": true},
  "skillOverrides": {},
  "professionOverrides": {}
}"#;

pub const LEGENDS_CONFIG: &str = r#"{
  "serverName": "Legends",
  "settings": {"maxSkillPoints": 300},
  "skillOverrides": {
    "combat_rifleman_novice": {"skillPoints": 1},
    "no_such_skill": {"skillPoints": 9}
  },
  "professionOverrides": {"disabledProfessions": ["jedi_lightsaber", "no_such_profession"]}
}"#;

pub const HARDCORE_CONFIG: &str = r#"{
  "serverName": "Hardcore",
  "skillOverrides": {"combat_rifleman_master": {"skillPoints": 10}}
}"#;

/// Data root with base-game files and default/legends/hardcore/broken configs.
pub fn write_fixture_data_dir(name: &str) -> PathBuf {
    let root = unique_temp_dir(name);
    let base = root.join("base-game");
    let configs = root.join("server-configs");
    fs::create_dir_all(&base).expect("base-game dir");
    fs::create_dir_all(&configs).expect("server-configs dir");

    fs::write(base.join("professions.json"), PROFESSIONS).expect("professions fixture");
    fs::write(base.join("skills.json"), SKILLS).expect("skills fixture");
    fs::write(base.join("species.json"), SPECIES).expect("species fixture");

    fs::write(configs.join("default.json"), DEFAULT_CONFIG).expect("default config");
    fs::write(configs.join("legends.json"), LEGENDS_CONFIG).expect("legends config");
    fs::write(configs.join("hardcore.json"), HARDCORE_CONFIG).expect("hardcore config");
    fs::write(configs.join("broken.json"), "{ not json").expect("broken config");
    fs::write(configs.join("README.txt"), "not a config").expect("readme");
    root
}

pub fn loaded_service(root: &Path, policy: MergePolicy) -> DataService {
    let mut service = DataService::with_policy(DataPaths::from_root(root), policy);
    service.initialize().expect("fixture data should load");
    service
}

pub fn cleanup(root: &Path) {
    let _ = fs::remove_dir_all(root);
}
