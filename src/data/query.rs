//! Filters, search, and aggregate stats over the loaded collections.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{Profession, ServerConfig, Skill, Species, DEFAULT_MAX_SKILL_POINTS};
use crate::data::service::DataService;

pub const MIN_SEARCH_LEN: usize = 2;

pub fn filter_by_category<'a>(
    professions: BTreeMap<&'a str, &'a Profession>,
    category: &str,
) -> BTreeMap<&'a str, &'a Profession> {
    professions
        .into_iter()
        .filter(|(_, profession)| profession.category == category)
        .collect()
}

/// `profession` matches as a substring of the skill id; `search` matches the
/// title case-insensitively. Empty filters are skipped.
pub fn filter_skills<'a>(
    skills: impl IntoIterator<Item = (&'a String, &'a Skill)>,
    profession: Option<&str>,
    search: Option<&str>,
) -> BTreeMap<&'a str, &'a Skill> {
    let profession = profession.filter(|p| !p.is_empty());
    let search = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

    skills
        .into_iter()
        .filter(|(id, _)| profession.map_or(true, |p| id.contains(p)))
        .filter(|(_, skill)| {
            search
                .as_deref()
                .map_or(true, |needle| contains_ci(&skill.title, needle))
        })
        .map(|(id, skill)| (id.as_str(), skill))
        .collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    QueryTooShort,
}

impl SearchError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::QueryTooShort => "Search query must be at least 2 characters",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub professions: Vec<&'a Profession>,
    pub skills: Vec<&'a Skill>,
    pub species: Vec<&'a Species>,
}

impl SearchResults<'_> {
    pub fn total(&self) -> usize {
        self.professions.len() + self.skills.len() + self.species.len()
    }
}

/// Case-insensitive substring search over enabled professions (name and
/// description), skill titles, and species names.
pub fn search<'a>(service: &'a DataService, query: &str) -> Result<SearchResults<'a>, SearchError> {
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(SearchError::QueryTooShort);
    }
    let needle = query.to_lowercase();

    let professions = service
        .professions(false)
        .into_values()
        .filter(|profession| {
            contains_ci(&profession.display_name, &needle)
                || profession
                    .description
                    .as_deref()
                    .is_some_and(|description| contains_ci(description, &needle))
        })
        .collect();

    let skills = service
        .skills()
        .values()
        .filter(|skill| contains_ci(&skill.title, &needle))
        .collect();

    let species = service
        .species()
        .values()
        .filter(|species| contains_ci(&species.display_name, &needle))
        .collect();

    Ok(SearchResults {
        professions,
        skills,
        species,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    pub total_professions: usize,
    pub total_skills: usize,
    pub total_species: usize,
    pub professions_by_category: BTreeMap<String, usize>,
    pub average_skill_cost: u64,
    pub max_skill_points: u32,
    pub server_name: String,
}

/// Mean skill point cost, rounded half up. Zero for an empty set.
pub fn average_skill_cost<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> u64 {
    let (sum, count) = skills
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), skill| {
            (sum + u64::from(skill.skill_points), count + 1)
        });
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u64
}

pub fn compute_stats(service: &DataService) -> DataStats {
    let professions = service.all_professions();
    let mut professions_by_category = BTreeMap::new();
    for profession in professions.values() {
        let category = if profession.category.is_empty() {
            "unknown"
        } else {
            profession.category.as_str()
        };
        *professions_by_category.entry(category.to_string()).or_insert(0) += 1;
    }

    let config = service.server_config();
    DataStats {
        total_professions: professions.len(),
        total_skills: service.skills().len(),
        total_species: service.species().len(),
        professions_by_category,
        average_skill_cost: average_skill_cost(service.skills().values()),
        max_skill_points: max_skill_points(config),
        server_name: config
            .server_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}

fn max_skill_points(config: &ServerConfig) -> u32 {
    match config.settings.max_skill_points {
        0 => DEFAULT_MAX_SKILL_POINTS,
        points => points,
    }
}
