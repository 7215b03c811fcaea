//! Deterministic renaming of derived templates
//!
//! Rules are data (`rules`), applied by `NamingRules::rename` (`resolver`), and
//! reused to carry legacy aliases onto each derived template (`aliases`).

pub mod aliases;
pub mod resolver;
pub mod rules;

pub use aliases::derive_aliases;
pub use resolver::NamingError;
pub use rules::{NamingPolicy, NamingRules, RenameRule};
