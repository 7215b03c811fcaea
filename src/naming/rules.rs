//! Rename rules as data.
//!
//! The rule list, the specialization marker and the legacy alias label are all
//! plain values so deployments can override them from the settings file.

use serde::{Deserialize, Serialize};

/// Placeholder for the specialization id in a replacement
pub const ID_PLACEHOLDER: &str = "{id}";

/// Placeholder for the specialization's human name in the legacy label
pub const NAME_PLACEHOLDER: &str = "{name}";

/// One substring substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Substring to look for
    pub pattern: String,
    /// Text substituted for it; `{id}` is replaced by the specialization id
    pub replacement: String,
}

impl RenameRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Replacement text for a given specialization id
    pub fn replacement_for(&self, spec_id: &str) -> String {
        self.replacement.replace(ID_PLACEHOLDER, spec_id)
    }
}

/// What to do when no rule matches a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// Append the specialization id to the original name
    #[default]
    Suffix,
    /// Fail with `NamingError::NoMatchingRule`
    Strict,
}

/// Ordered rename rules plus the markers used around them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingRules {
    /// Fallback when nothing matches
    pub policy: NamingPolicy,
    /// Text that prefixes every specialized name; an occurrence right after it
    /// is already specialized and never matched again
    pub marker: String,
    /// Word replaced when building the human-readable legacy alias
    pub legacy_marker: String,
    /// Replacement for `legacy_marker`; `{name}` is the specialization name
    pub legacy_label: String,
    /// Rules in priority order, most specific first
    pub rules: Vec<RenameRule>,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self::industrial_defaults()
    }
}

impl NamingRules {
    /// Built-in rules for the host's industrial, storage and generic templates
    pub fn industrial_defaults() -> Self {
        Self {
            policy: NamingPolicy::Suffix,
            marker: "Specialized".to_string(),
            legacy_marker: "Industrial".to_string(),
            legacy_label: "Specialized Industrial {name}".to_string(),
            rules: vec![
                RenameRule::new("IndustrialManufacturing", "SpecializedIndustrialManufacturing{id}"),
                RenameRule::new("Industrial Manufacturing", "SpecializedIndustrialManufacturing{id}"),
                RenameRule::new("IndustrialStorage", "SpecializedIndustrialStorage{id}"),
                RenameRule::new("Warehouses", "SpecializedIndustrialStorage{id}"),
                RenameRule::new("Industrial", "SpecializedIndustrial{id}"),
            ],
        }
    }

    /// Custom rule list with the default markers
    pub fn with_rules(rules: Vec<RenameRule>, policy: NamingPolicy) -> Self {
        Self {
            policy,
            rules,
            ..Self::industrial_defaults()
        }
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    /// Validate the rule list
    pub fn validate(&self) -> Result<(), String> {
        if let Some(index) = self.rules.iter().position(|r| r.pattern.is_empty()) {
            return Err(format!("naming rule #{} has an empty pattern", index + 1));
        }
        if let Some(rule) = self.rules.iter().find(|r| r.replacement.is_empty()) {
            return Err(format!(
                "naming rule for '{}' has an empty replacement",
                rule.pattern
            ));
        }
        Ok(())
    }
}
