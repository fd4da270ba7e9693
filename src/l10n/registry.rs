// src/l10n/registry.rs  —  Loaded set, active language, subscribed bindings
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use super::binding::{Resolved, TextBinding, FALLBACK_TEXT};
use super::csv::{self, Row};
use super::error::{L10nError, Result};
use super::probe::LanguageProbe;
use super::source::ResourceLoader;
use super::table::{self, LanguageTable, LocalizationSet};

pub type SharedBinding = Rc<RefCell<TextBinding>>;

/// Result of notifying bindings after a language change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notified {
    /// Live bindings that were resolved
    pub bindings: usize,
    /// Keys that fell back to the placeholder text, in notification order
    pub missing:  Vec<String>,
}

/// A freshly subscribed binding and how its first resolve went
#[derive(Debug)]
pub struct Subscription {
    pub handle:  SharedBinding,
    /// `None` when no language was active to resolve against
    pub initial: Option<Result<Resolved>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    Changed(Notified),
    /// Target already active; nothing was notified
    Redundant,
}

/// Owns the localization set and drives language changes.
///
/// Uninitialized → Loaded (no active language) → Active(lang).
/// Failed loads and switches leave the registry as it was.
pub struct Registry {
    separator:   char,
    set:         Option<LocalizationSet>,
    active:      Option<String>,
    subscribers: Vec<Weak<RefCell<TextBinding>>>,
}

impl Default for Registry {
    fn default() -> Self { Self::new(csv::DEFAULT_SEPARATOR) }
}

impl Registry {
    pub fn new(separator: char) -> Self {
        Self { separator, set: None, active: None, subscribers: Vec::new() }
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Read resource `id` and replace the current set.
    pub fn load(&mut self, loader: &dyn ResourceLoader, id: &str) -> Result<()> {
        let rows = csv::read_rows(loader, id, self.separator).map_err(|e| {
            log::error!("[l10n] failed to read '{}': {e}", id);
            e
        })?;
        self.install(&rows)
    }

    /// Same as `load` but from text already in memory.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let rows: Vec<Row> = csv::rows(text, self.separator).collect();
        self.install(&rows)
    }

    fn install(&mut self, rows: &[Row]) -> Result<()> {
        let set = table::build(rows).map_err(|e| {
            log::error!("[l10n] {e}; keeping previous table");
            e
        })?;

        // A reload keeps the active language when the new set still has it
        let keep = self.active.as_deref().is_some_and(|l| set.contains(l));
        self.set = Some(set);
        if keep {
            self.notify();
        } else if let Some(old) = self.active.take() {
            log::warn!("[l10n] reloaded table has no '{}'; no language selected", old);
            self.clear_bindings();
        }
        Ok(())
    }

    // ── Switching ─────────────────────────────────────────────────────────────

    pub fn switch_language(&mut self, name: &str) -> Result<Switch> {
        let Some(set) = &self.set else {
            log::error!("[l10n] cannot switch to '{}': no table loaded", name);
            return Err(L10nError::NotLoaded);
        };
        if self.active.as_deref() == Some(name) {
            log::warn!("[l10n] '{}' is already active; skipping", name);
            return Ok(Switch::Redundant);
        }
        if !set.contains(name) {
            log::error!("[l10n] language '{}' not found", name);
            return Err(L10nError::UnknownLanguage(name.to_string()));
        }
        self.active = Some(name.to_string());
        log::info!("[l10n] language → {}", name);
        Ok(Switch::Changed(self.notify()))
    }

    /// Startup selection: the probed system language when `use_probe`,
    /// otherwise `default` if it is non-empty. Returns the language now active.
    pub fn select_initial(
        &mut self,
        default:   &str,
        probe:     &dyn LanguageProbe,
        use_probe: bool,
    ) -> Result<Option<String>> {
        let wanted = if use_probe {
            probe.language()
        } else {
            Some(default.to_string()).filter(|d| !d.is_empty())
        };
        match wanted {
            Some(lang) => {
                self.switch_language(&lang)?;
                Ok(self.active.clone())
            }
            None => {
                log::debug!("[l10n] no initial language requested");
                Ok(None)
            }
        }
    }

    /// Step through languages in header order, wrapping; `-1` goes back.
    pub fn cycle_language(&mut self, step: isize) -> Result<Switch> {
        let set = self.set.as_ref().ok_or(L10nError::NotLoaded)?;
        let langs = set.languages();
        let n = langs.len() as isize;
        let here = self.active.as_deref()
            .and_then(|a| langs.iter().position(|l| l == a))
            .map_or(-1, |i| i as isize);
        let next = if here < 0 && step < 0 { n - 1 } else { (here + step).rem_euclid(n) };
        let target = langs[next as usize].clone();
        self.switch_language(&target)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn current_table(&self) -> Result<&LanguageTable> {
        let name = self.active.as_deref().ok_or(L10nError::NoActiveLanguage)?;
        self.set.as_ref()
            .and_then(|s| s.get(name))
            .ok_or(L10nError::NoActiveLanguage)
    }

    /// Text for `key` in the active language, or the fallback placeholder
    pub fn text(&self, key: &str) -> &str {
        self.current_table().ok()
            .and_then(|t| t.get(key))
            .unwrap_or(FALLBACK_TEXT)
    }

    pub fn active_language(&self) -> Option<&str> { self.active.as_deref() }
    pub fn set(&self) -> Option<&LocalizationSet> { self.set.as_ref() }
    pub fn is_loaded(&self) -> bool { self.set.is_some() }
    pub fn separator(&self) -> char { self.separator }

    pub fn languages(&self) -> &[String] {
        self.set.as_ref().map(LocalizationSet::languages).unwrap_or_default()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    /// Register `binding` and resolve it against the active table right away.
    /// The registry only keeps a weak reference; dropping the returned handle
    /// unsubscribes it.
    pub fn subscribe(&mut self, binding: TextBinding) -> Subscription {
        let initial = self.current_table().ok().map(|t| binding.resolve(t));
        let handle = Rc::new(RefCell::new(binding));
        self.subscribers.push(Rc::downgrade(&handle));
        Subscription { handle, initial }
    }

    pub fn unsubscribe(&mut self, binding: &SharedBinding) {
        self.subscribers.retain(|w| !std::ptr::eq(w.as_ptr(), Rc::as_ptr(binding)));
    }

    /// Live subscriptions (dead ones are pruned on the next notification)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|w| w.strong_count() > 0).count()
    }

    fn clear_bindings(&mut self) {
        self.subscribers.retain(|w| w.strong_count() > 0);
        for b in self.subscribers.iter().filter_map(Weak::upgrade) {
            b.borrow().clear();
        }
    }

    fn notify(&mut self) -> Notified {
        self.subscribers.retain(|w| w.strong_count() > 0);
        let mut report = Notified::default();
        let Some(table) = self.active.as_deref().and_then(|a| self.set.as_ref()?.get(a)) else {
            return report;
        };
        for b in self.subscribers.iter().filter_map(Weak::upgrade) {
            report.bindings += 1;
            if let Err(L10nError::MissingKey(k)) = b.borrow().resolve(table) {
                report.missing.push(k);
            }
        }
        log::debug!("[l10n] notified {} binding(s), {} missing", report.bindings, report.missing.len());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::probe::FixedProbe;
    use crate::l10n::source::MemoryLoader;
    use crate::l10n::TextTarget;

    const SAMPLE: &str = ",en,jp\ngreeting,Hello,こんにちは\nfarewell,Bye,さようなら\n";

    fn loaded() -> Registry {
        let mut r = Registry::default();
        r.load_str(SAMPLE).unwrap();
        r
    }

    fn label() -> Rc<RefCell<String>> { Rc::new(RefCell::new(String::new())) }

    #[test]
    fn starts_uninitialized() {
        let r = Registry::default();
        assert!(!r.is_loaded());
        assert!(r.languages().is_empty());
        assert_eq!(r.current_table().unwrap_err(), L10nError::NoActiveLanguage);
        assert_eq!(r.text("greeting"), FALLBACK_TEXT);
    }

    #[test]
    fn switch_before_load_is_not_found() {
        let mut r = Registry::default();
        let err = r.switch_language("en").unwrap_err();
        assert_eq!(err, L10nError::NotLoaded);
        assert!(err.is_not_found());
        assert_eq!(r.active_language(), None);
    }

    #[test]
    fn loaded_has_no_active_language() {
        let r = loaded();
        assert_eq!(r.languages(), ["en", "jp"]);
        assert_eq!(r.active_language(), None);
        assert!(r.current_table().is_err());
    }

    #[test]
    fn switch_then_resolve() {
        let mut r = loaded();
        let out = label();
        let _b = r.subscribe(TextBinding::new("greeting").with_target(out.clone()));
        assert_eq!(*out.borrow(), "");

        let sw = r.switch_language("jp").unwrap();
        assert_eq!(sw, Switch::Changed(Notified { bindings: 1, missing: vec![] }));
        assert_eq!(*out.borrow(), "こんにちは");
        assert_eq!(r.current_table().unwrap().name(), "jp");
        assert_eq!(r.text("farewell"), "さようなら");
    }

    #[test]
    fn redundant_switch_notifies_nobody() {
        let mut r = loaded();
        r.switch_language("en").unwrap();
        let out = label();
        let _b = r.subscribe(TextBinding::new("greeting").with_target(out.clone()));
        assert_eq!(*out.borrow(), "Hello");
        out.borrow_mut().set_text("touched");

        assert_eq!(r.switch_language("en").unwrap(), Switch::Redundant);
        assert_eq!(*out.borrow(), "touched");
        assert_eq!(r.active_language(), Some("en"));
    }

    #[test]
    fn unknown_language_keeps_state() {
        let mut r = loaded();
        r.switch_language("en").unwrap();
        let err = r.switch_language("fr").unwrap_err();
        assert_eq!(err, L10nError::UnknownLanguage("fr".into()));
        assert!(err.is_not_found());
        assert_eq!(r.active_language(), Some("en"));
    }

    #[test]
    fn subscribe_resolves_immediately_when_active() {
        let mut r = loaded();
        r.switch_language("jp").unwrap();
        let out = label();
        let _b = r.subscribe(TextBinding::new("farewell").with_target(out.clone()));
        assert_eq!(*out.borrow(), "さようなら");
    }

    #[test]
    fn notification_reports_missing_keys() {
        let mut r = loaded();
        let out = label();
        let _a = r.subscribe(TextBinding::new("greeting"));
        let _b = r.subscribe(TextBinding::new("nope").with_target(out.clone()));
        let Switch::Changed(n) = r.switch_language("en").unwrap() else { panic!("expected change") };
        assert_eq!(n.bindings, 2);
        assert_eq!(n.missing, vec!["nope".to_string()]);
        assert_eq!(*out.borrow(), FALLBACK_TEXT);
    }

    #[test]
    fn dropped_and_unsubscribed_bindings_are_not_notified() {
        let mut r = loaded();
        let a = r.subscribe(TextBinding::new("greeting"));
        let b = r.subscribe(TextBinding::new("farewell"));
        let c = r.subscribe(TextBinding::new("farewell"));
        assert_eq!(r.subscriber_count(), 3);

        drop(a);
        r.unsubscribe(&b.handle);
        assert_eq!(r.subscriber_count(), 1);
        let Switch::Changed(n) = r.switch_language("en").unwrap() else { panic!("expected change") };
        assert_eq!(n.bindings, 1);
        drop(c);
    }

    #[test]
    fn notifies_in_registration_order() {
        struct Log(Rc<RefCell<Vec<String>>>, &'static str);
        impl TextTarget for Log {
            fn set_text(&mut self, text: &str) { self.0.borrow_mut().push(format!("{}:{text}", self.1)); }
        }
        let mut r = loaded();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _x = r.subscribe(TextBinding::new("greeting").with_target(Rc::new(RefCell::new(Log(log.clone(), "x")))));
        let _y = r.subscribe(TextBinding::new("farewell").with_target(Rc::new(RefCell::new(Log(log.clone(), "y")))));
        r.switch_language("en").unwrap();
        assert_eq!(*log.borrow(), ["x:Hello", "y:Bye"]);
    }

    #[test]
    fn failed_reload_keeps_previous_set() {
        let mut r = loaded();
        r.switch_language("jp").unwrap();
        let err = r.load_str(",en,jp\n").unwrap_err();
        assert!(matches!(err, L10nError::MalformedTable(_)));
        assert_eq!(r.languages(), ["en", "jp"]);
        assert_eq!(r.active_language(), Some("jp"));
    }

    #[test]
    fn reload_keeps_active_language_and_refreshes() {
        let mut r = loaded();
        r.switch_language("jp").unwrap();
        let out = label();
        let _b = r.subscribe(TextBinding::new("greeting").with_target(out.clone()));
        r.load_str(",jp\ngreeting,おはよう\n").unwrap();
        assert_eq!(r.active_language(), Some("jp"));
        assert_eq!(*out.borrow(), "おはよう");
    }

    #[test]
    fn reload_without_active_language_resets() {
        let mut r = loaded();
        r.switch_language("jp").unwrap();
        let out = label();
        let _b = r.subscribe(TextBinding::new("greeting").with_target(out.clone()));
        assert_eq!(*out.borrow(), "こんにちは");

        r.load_str(",en\ngreeting,Hi\n").unwrap();
        assert_eq!(r.active_language(), None);
        // no language left to show, so nothing from 'jp' lingers
        assert_eq!(*out.borrow(), "");
    }

    #[test]
    fn subscribe_reports_first_resolve() {
        let mut r = loaded();
        assert!(r.subscribe(TextBinding::new("greeting")).initial.is_none());

        r.switch_language("en").unwrap();
        assert_eq!(r.subscribe(TextBinding::new("greeting")).initial, Some(Ok(Resolved::Applied)));
        assert_eq!(
            r.subscribe(TextBinding::new("nope")).initial,
            Some(Err(L10nError::MissingKey("nope".into())))
        );
    }

    #[test]
    fn loads_carriage_return_only_resource() {
        let mut r = Registry::default();
        r.load_str(",en,jp\rgreeting,Hello,こんにちは\rfarewell,Bye,さようなら").unwrap();
        assert_eq!(r.languages(), ["en", "jp"]);
        r.switch_language("jp").unwrap();
        assert_eq!(r.text("greeting"), "こんにちは");
    }

    #[test]
    fn load_from_loader() {
        let loader = MemoryLoader::new().with("ui", "k;en;de\nok;OK;Gut\n");
        let mut r = Registry::new(';');
        r.load(&loader, "ui").unwrap();
        assert_eq!(r.languages(), ["en", "de"]);
        assert!(matches!(r.load(&loader, "missing"), Err(L10nError::ResourceUnavailable { .. })));
        assert!(r.is_loaded());
    }

    #[test]
    fn initial_selection_prefers_probe_when_enabled() {
        let mut r = loaded();
        let probe = FixedProbe(Some("jp".into()));
        assert_eq!(r.select_initial("en", &probe, true).unwrap().as_deref(), Some("jp"));

        let mut r = loaded();
        assert_eq!(r.select_initial("en", &probe, false).unwrap().as_deref(), Some("en"));

        let mut r = loaded();
        assert_eq!(r.select_initial("", &probe, false).unwrap(), None);
        assert_eq!(r.active_language(), None);
    }

    #[test]
    fn initial_selection_unknown_probe_language_fails() {
        let mut r = loaded();
        let probe = FixedProbe(Some("xx".into()));
        assert!(r.select_initial("en", &probe, true).unwrap_err().is_not_found());
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut r = loaded();
        r.cycle_language(1).unwrap();
        assert_eq!(r.active_language(), Some("en"));
        r.cycle_language(1).unwrap();
        assert_eq!(r.active_language(), Some("jp"));
        r.cycle_language(1).unwrap();
        assert_eq!(r.active_language(), Some("en"));
        r.cycle_language(-1).unwrap();
        assert_eq!(r.active_language(), Some("jp"));

        let mut r = loaded();
        r.cycle_language(-1).unwrap();
        assert_eq!(r.active_language(), Some("jp"));
    }
}
