// src/tui/mod.rs  —  ratatui terminal interface
#[cfg(feature = "tui")]
mod inner;
#[cfg(feature = "tui")]
pub use inner::Tui;

#[cfg(not(feature = "tui"))]
pub struct Tui;
#[cfg(not(feature = "tui"))]
impl Tui {
    pub fn new() -> anyhow::Result<Self> { Ok(Self) }
    pub fn draw(&mut self, _view: &View<'_>) -> anyhow::Result<()> { Ok(()) }
    pub fn cleanup(&mut self) {}
}

use crate::l10n::{L10nError, Registry};
use crate::widgets::Board;

/// Everything one frame needs
pub struct View<'a> {
    pub title:    &'a str,
    pub registry: &'a Registry,
    pub board:    &'a Board,
    pub status:   &'a str,
}

impl View<'_> {
    /// Language tabs with the active one marked, e.g. `[en] ja de`
    pub fn language_bar(&self) -> String {
        let active = self.registry.active_language();
        self.registry.languages().iter()
            .enumerate()
            .map(|(i, l)| if Some(l.as_str()) == active {
                format!("[{}:{l}]", i + 1)
            } else {
                format!(" {}:{l} ", i + 1)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One-line summary of the registry state
pub fn describe(registry: &Registry) -> String {
    match registry.active_language() {
        Some(lang) => format!("language: {lang}"),
        None if registry.is_loaded() => "no language selected".into(),
        None => "no table loaded".into(),
    }
}

/// First status line: the load error, else the startup selection error, else the state
pub fn startup_status(
    registry:   &Registry,
    load_err:   Option<&L10nError>,
    select_err: Option<&L10nError>,
) -> String {
    match (load_err, select_err) {
        (Some(e), _)    => e.to_string(),
        (None, Some(e)) => format!("{} ({e})", describe(registry)),
        (None, None)    => describe(registry),
    }
}
