//! Id and display-name derivation used when extracting legacy data.

/// Lowercase, then replace every character outside `[a-z0-9]` with `_`.
/// "Bio-Engineer" -> "bio_engineer", "Jedi (Light)" -> "jedi__light_".
pub fn normalize_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// "force_sensitive_combat" -> "Force Sensitive Combat".
/// Every alphanumeric run that starts a word gets its first letter upper-cased.
pub fn title_case_from_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// "mon_calamari" -> "Mon calamari". Only the first character is capitalized.
pub fn species_display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace('_', " ");
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// Last `_`-separated segment of a key ("jedi_light_side" -> "side").
pub fn last_segment(key: &str) -> &str {
    key.rsplit('_').next().unwrap_or(key)
}
