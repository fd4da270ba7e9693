// src/widgets.rs  —  Text widgets bound to the registry
use std::cell::RefCell;
use std::rc::Rc;
use crate::l10n::{Registry, SharedBinding, TextBinding};

/// A single line of localized text. Dropping it unsubscribes its binding.
pub struct Label {
    key:      String,
    text:     Rc<RefCell<String>>,
    _binding: SharedBinding,
}

impl Label {
    pub fn new(registry: &mut Registry, key: &str) -> Self {
        let text = Rc::new(RefCell::new(String::new()));
        let sub = registry.subscribe(TextBinding::new(key).with_target(text.clone()));
        Self { key: key.to_string(), text, _binding: sub.handle }
    }

    pub fn key(&self) -> &str { &self.key }
    pub fn text(&self) -> String { self.text.borrow().clone() }
}

/// One label per key of the loaded table, sorted by key
#[derive(Default)]
pub struct Board {
    labels: Vec<Label>,
}

impl Board {
    pub fn build(registry: &mut Registry) -> Self {
        let keys: Vec<String> = registry.set()
            .map(|s| s.keys().into_iter().map(str::to_owned).collect())
            .unwrap_or_default();
        let labels = keys.iter().map(|k| Label::new(registry, k)).collect();
        Self { labels }
    }

    /// Label for `key`, if the board has one
    pub fn label(&self, key: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.key == key)
    }

    pub fn labels(&self) -> &[Label] { &self.labels }
    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}
