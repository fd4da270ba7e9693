// src/l10n/error.rs  —  Localization error kinds
use thiserror::Error;

pub type Result<T> = std::result::Result<T, L10nError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum L10nError {
    /// Backing text could not be located or read
    #[error("localization resource '{id}' unavailable: {reason}")]
    ResourceUnavailable { id: String, reason: String },

    /// Table shape is unusable (too few rows/columns, bad header, short row)
    #[error("malformed localization table: {0}")]
    MalformedTable(String),

    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// A switch was requested before any table was loaded
    #[error("no localization table loaded")]
    NotLoaded,

    #[error("no language selected")]
    NoActiveLanguage,

    /// Binding key absent from the active table; fallback text was written
    #[error("missing localized text for key '{0}'")]
    MissingKey(String),
}

impl L10nError {
    /// Both "language absent" and "nothing loaded" count as not-found for a switch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownLanguage(_) | Self::NotLoaded)
    }
}
