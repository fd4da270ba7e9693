// src/l10n/mod.rs  —  CSV localization tables + language switching
//
// Resource text is parsed into rows, rows into one key → text table per
// language, and the `Registry` pushes the active table to every subscribed
// `TextBinding` when the language changes.
pub mod binding;
pub mod csv;
pub mod error;
pub mod probe;
pub mod registry;
pub mod source;
pub mod table;

pub use binding::{Resolved, SharedTarget, TextBinding, TextTarget, FALLBACK_TEXT};
pub use csv::{Row, DEFAULT_SEPARATOR};
pub use error::{L10nError, Result};
pub use probe::{EnvProbe, FixedProbe, LanguageProbe};
pub use registry::{Notified, Registry, SharedBinding, Subscription, Switch};
pub use source::{FileLoader, MemoryLoader, ResourceLoader};
pub use table::{LanguageTable, LocalizationSet};
