// src/l10n/table.rs  —  Rows → per-language key/text tables
use std::collections::{HashMap, HashSet};
use super::csv::Row;
use super::error::{L10nError, Result};

/// Key → localized text for one language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageTable {
    name:  String,
    texts: HashMap<String, String>,
}

impl LanguageTable {
    fn with_capacity(name: &str, capacity: usize) -> Self {
        Self { name: name.to_string(), texts: HashMap::with_capacity(capacity) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn get(&self, key: &str) -> Option<&str> { self.texts.get(key).map(String::as_str) }
    pub fn contains(&self, key: &str) -> bool { self.texts.contains_key(key) }
    pub fn len(&self) -> usize { self.texts.len() }
    pub fn is_empty(&self) -> bool { self.texts.is_empty() }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.texts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// All languages of one resource, in header order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalizationSet {
    order:  Vec<String>,
    tables: HashMap<String, LanguageTable>,
}

impl LocalizationSet {
    pub fn get(&self, language: &str) -> Option<&LanguageTable> { self.tables.get(language) }
    pub fn contains(&self, language: &str) -> bool { self.tables.contains_key(language) }
    pub fn languages(&self) -> &[String] { &self.order }
    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Every table shares the same key set, so any one of them will do
    pub fn keys(&self) -> Vec<&str> {
        self.order.first()
            .and_then(|l| self.tables.get(l))
            .map(LanguageTable::keys)
            .unwrap_or_default()
    }
}

/// Build a set from header + data rows.
///
/// Header field 0 is a label and ignored; fields 1.. name the languages.
/// Data row field 0 is the key. A repeated key overwrites the earlier row.
/// Fields beyond the header width are ignored; fields are never trimmed.
pub fn build(rows: &[Row]) -> Result<LocalizationSet> {
    if rows.len() < 2 {
        return Err(L10nError::MalformedTable(format!(
            "need a header and at least one data row, got {} row(s)", rows.len()
        )));
    }
    let header = &rows[0];
    let columns = header.len();
    if columns < 2 {
        return Err(L10nError::MalformedTable(
            "header needs a label column and at least one language".into()
        ));
    }

    let mut seen = HashSet::with_capacity(columns);
    for (c, name) in header.iter().enumerate().skip(1) {
        if name.is_empty() {
            return Err(L10nError::MalformedTable(format!("empty language name in column {c}")));
        }
        if !seen.insert(name.as_str()) {
            return Err(L10nError::MalformedTable(format!("duplicate language '{name}'")));
        }
    }
    if let Some((line, row)) = rows.iter().enumerate().skip(1).find(|(_, r)| r.len() < columns) {
        return Err(L10nError::MalformedTable(format!(
            "row {} has {} field(s), header has {}", line + 1, row.len(), columns
        )));
    }

    let mut set = LocalizationSet {
        order:  Vec::with_capacity(columns - 1),
        tables: HashMap::with_capacity(columns - 1),
    };
    for c in 1..columns {
        let language = &header[c];
        let mut table = LanguageTable::with_capacity(language, rows.len() - 1);
        for row in &rows[1..] {
            table.texts.insert(row[0].clone(), row[c].clone());
        }
        set.order.push(language.clone());
        set.tables.insert(language.clone(), table);
    }
    log::info!("[table] built {} language(s) × {} key(s)", set.len(), set.keys().len());
    Ok(set)
}
