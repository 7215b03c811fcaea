//! Deterministic renaming of templates for a specialization

use thiserror::Error;

use crate::naming::rules::{NamingPolicy, NamingRules, NAME_PLACEHOLDER};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("no rename rule matches '{name}' for specialization {spec_id}")]
    NoMatchingRule { name: String, spec_id: String },
}

impl NamingRules {
    /// Rename `original` for the specialization `spec_id`
    ///
    /// Rules are tried in order and the first one with an unguarded occurrence
    /// wins; all of its unguarded occurrences are replaced. An occurrence right
    /// after the marker belongs to an earlier specialization and is skipped, so
    /// renaming an already specialized name never re-specializes it.
    pub fn rename(&self, original: &str, spec_id: &str) -> Result<String, NamingError> {
        for rule in &self.rules {
            if let Some(renamed) =
                replace_unguarded(original, &rule.pattern, &rule.replacement_for(spec_id), &self.marker)
            {
                return Ok(renamed);
            }
        }

        match self.policy {
            NamingPolicy::Suffix => Ok(format!("{original}{spec_id}")),
            NamingPolicy::Strict => Err(NamingError::NoMatchingRule {
                name: original.to_string(),
                spec_id: spec_id.to_string(),
            }),
        }
    }

    /// Human-readable legacy name: the legacy marker word replaced by a label
    /// carrying the specialization name
    pub fn legacy_name(&self, original: &str, spec_name: &str) -> String {
        if self.legacy_marker.is_empty() {
            return original.to_string();
        }
        let label = self.legacy_label.replace(NAME_PLACEHOLDER, spec_name);
        original.replace(&self.legacy_marker, &label)
    }
}

/// Replace every occurrence of `pattern` not directly preceded by `marker`
///
/// Returns `None` when there is no such occurrence.
fn replace_unguarded(text: &str, pattern: &str, replacement: &str, marker: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut last = 0;
    let mut replaced = false;

    for (index, matched) in text.match_indices(pattern) {
        let guarded = !marker.is_empty() && text[..index].ends_with(marker);
        if guarded {
            continue;
        }
        out.push_str(&text[last..index]);
        out.push_str(replacement);
        last = index + matched.len();
        replaced = true;
    }

    if !replaced {
        return None;
    }
    out.push_str(&text[last..]);
    Some(out)
}
