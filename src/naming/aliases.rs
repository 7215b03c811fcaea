//! Alias propagation onto derived templates.

use crate::host::template::{AliasRecord, TemplateKind};
use crate::naming::rules::NamingRules;

/// Build the alias table of a derived template
///
/// Existing aliases of the source are renamed for `spec_id` and kept first,
/// followed by the legacy alias of the source itself and the legacy alias of
/// every existing entry. Nothing is removed; exact duplicates are dropped.
/// An existing alias that cannot be renamed is kept as it was.
pub fn derive_aliases(
    rules: &NamingRules,
    source_name: &str,
    kind: TemplateKind,
    existing: &[AliasRecord],
    spec_id: &str,
    spec_name: &str,
) -> Vec<AliasRecord> {
    let mut aliases = Vec::with_capacity(existing.len() * 2 + 1);

    for alias in existing {
        let renamed = match rules.rename(&alias.name, spec_id) {
            Ok(name) if name != alias.name => name,
            Ok(_) => {
                tracing::warn!(
                    alias = %alias.name,
                    template = source_name,
                    spec_id,
                    "Alias was not changed by renaming"
                );
                alias.name.clone()
            }
            Err(e) => {
                tracing::warn!(alias = %alias.name, template = source_name, spec_id, "{e}");
                alias.name.clone()
            }
        };
        push_unique(&mut aliases, AliasRecord::new(renamed, alias.kind));
    }

    push_unique(
        &mut aliases,
        AliasRecord::new(rules.legacy_name(source_name, spec_name), kind),
    );

    for alias in existing {
        push_unique(
            &mut aliases,
            AliasRecord::new(rules.legacy_name(&alias.name, spec_name), alias.kind),
        );
    }

    aliases
}

fn push_unique(aliases: &mut Vec<AliasRecord>, record: AliasRecord) {
    if !aliases.contains(&record) {
        aliases.push(record);
    }
}
