//! Muscle-group label normalization.
//!
//! Log rows may carry compound labels like `"Back/Biceps"` or
//! `"Posterior Chain (Glutes/Hamstrings/Back)"`. Compounds are expanded into
//! one row per constituent group; detailed labels are additionally mapped to
//! coarse groups for analytics.

/// Splits a compound muscle-group label into its constituent groups.
///
/// Labels containing `/` are compounds. If a parenthesized segment is
/// present, the constituents are the slash-separated tokens inside the
/// parentheses; otherwise the whole label is split on `/`. Non-compound
/// labels pass through as a single element.
#[must_use]
pub fn expand_compound(label: &str) -> Vec<String> {
    if !label.contains('/') {
        return vec![label.trim().to_string()];
    }

    let compound = parenthesized_segment(label).unwrap_or(label);

    compound
        .split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a detailed muscle-group label to its coarse analytics group.
/// Unmapped labels fall back to themselves.
#[must_use]
pub fn group_for_analytics(detailed_label: &str) -> String {
    match detailed_label {
        "Quads" | "Glutes" | "Hamstrings" | "Calves" => "Legs".to_string(),
        "Biceps" | "Triceps" | "Forearms" => "Arms".to_string(),
        "Rear Delts" | "Traps" => "Shoulders".to_string(),
        other => other.to_string(),
    }
}

fn parenthesized_segment(label: &str) -> Option<&str> {
    let start = label.find('(')?;
    let end = label[start..].find(')')? + start;

    label.get(start + 1..end)
}
