// src/l10n/probe.rs  —  Host language detection
/// Supplies the ambient language name, if the host has one
pub trait LanguageProbe {
    fn language(&self) -> Option<String>;
}

/// Reads the POSIX locale variables in priority order: LC_ALL, LC_MESSAGES, LANG.
/// Answers with the ISO 639-1 part (`ja`, not `Japanese`), so header names must use codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProbe;

impl LanguageProbe for EnvProbe {
    fn language(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"].iter()
            .filter_map(|v| std::env::var(v).ok())
            .find_map(|raw| language_part(&raw))
    }
}

/// Always answers with the given language; handy for tests and `--lang`-style overrides
#[derive(Debug, Clone, Default)]
pub struct FixedProbe(pub Option<String>);

impl LanguageProbe for FixedProbe {
    fn language(&self) -> Option<String> { self.0.clone() }
}

/// `ja_JP.UTF-8@euro` → `ja`.  Empty, `C` and `POSIX` mean "no preference".
pub fn language_part(locale: &str) -> Option<String> {
    let lang = locale
        .split(['.', '@']).next().unwrap_or("")
        .split(['_', '-']).next().unwrap_or("")
        .trim();
    match lang {
        "" | "C" | "POSIX" => None,
        l => Some(l.to_string()),
    }
}
