// src/l10n/binding.rs  —  Key ↔ render target association
use std::cell::RefCell;
use std::rc::Rc;
use super::error::{L10nError, Result};
use super::table::LanguageTable;

/// Written to every target when a key is absent from the active table
pub const FALLBACK_TEXT: &str = "Not Found Localized Text.";

/// Somewhere localized text can be written
pub trait TextTarget {
    fn set_text(&mut self, text: &str);
}

impl TextTarget for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

pub type SharedTarget = Rc<RefCell<dyn TextTarget>>;

/// What `resolve` did to the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Text found and written
    Applied,
    /// Text found but empty; targets keep their previous content
    Empty,
}

pub struct TextBinding {
    key:     String,
    targets: Vec<SharedTarget>,
}

impl TextBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), targets: Vec::new() }
    }

    pub fn with_target(mut self, target: SharedTarget) -> Self {
        self.attach(target);
        self
    }

    pub fn attach(&mut self, target: SharedTarget) { self.targets.push(target); }
    pub fn key(&self) -> &str { &self.key }
    pub fn target_count(&self) -> usize { self.targets.len() }

    /// Look the key up in `table` and push the text to every target.
    ///
    /// A missing key writes `FALLBACK_TEXT` and returns `MissingKey`;
    /// an empty text leaves the targets untouched.
    pub fn resolve(&self, table: &LanguageTable) -> Result<Resolved> {
        match table.get(&self.key) {
            None => {
                log::error!("[binding] no '{}' text for key '{}'", table.name(), self.key);
                self.write(FALLBACK_TEXT);
                Err(L10nError::MissingKey(self.key.clone()))
            }
            Some("") => Ok(Resolved::Empty),
            Some(text) => {
                self.write(text);
                Ok(Resolved::Applied)
            }
        }
    }

    /// Blank every target; used when no language is active any more
    pub fn clear(&self) { self.write(""); }

    fn write(&self, text: &str) {
        for t in &self.targets {
            t.borrow_mut().set_text(text);
        }
    }
}

impl std::fmt::Debug for TextBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBinding")
            .field("key", &self.key)
            .field("targets", &self.targets.len())
            .finish()
    }
}
