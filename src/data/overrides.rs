//! Apply a server configuration's overrides onto the in-memory collections.

use tracing::debug;

use crate::data::model::{Professions, ServerConfig, Skills};

/// How a configuration switch treats overrides from the previously active configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Apply onto the current state; earlier overrides stay in effect.
    #[default]
    Accumulate,
    /// Restore the base dataset first, so only the new configuration's overrides apply.
    ResetToBase,
}

/// Which override ids matched an existing entry and which were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideReport {
    pub skills_patched: Vec<String>,
    pub professions_disabled: Vec<String>,
    pub unknown_skills: Vec<String>,
    pub unknown_professions: Vec<String>,
}

/// Patch matching skills and set `disabled` on listed professions.
/// Ids that do not exist are skipped; nothing is ever created, removed, or re-enabled.
pub fn apply_overrides(
    professions: &mut Professions,
    skills: &mut Skills,
    config: &ServerConfig,
) -> OverrideReport {
    let mut report = OverrideReport::default();

    for (skill_id, patch) in &config.skill_overrides {
        match skills.get_mut(skill_id) {
            Some(skill) => {
                patch.apply_to(skill);
                report.skills_patched.push(skill_id.clone());
            }
            None => {
                debug!(skill_id = %skill_id, "skill override ignored: unknown skill");
                report.unknown_skills.push(skill_id.clone());
            }
        }
    }

    for profession_id in &config.profession_overrides.disabled_professions {
        match professions.get_mut(profession_id) {
            Some(profession) => {
                profession.disabled = true;
                report.professions_disabled.push(profession_id.clone());
            }
            None => {
                debug!(profession_id = %profession_id, "profession override ignored: unknown profession");
                report.unknown_professions.push(profession_id.clone());
            }
        }
    }

    report
}
