// src/l10n/csv.rs  —  Delimited text → rows of fields (no quoting, no escapes)
use super::error::Result;
use super::source::ResourceLoader;

pub const DEFAULT_SEPARATOR: char = ',';

/// One delimited line, fields in column order
pub type Row = Vec<String>;

/// Lazy row iterator over borrowed text
pub struct Rows<'a> {
    rest:      &'a str,
    separator: char,
}

impl<'a> Rows<'a> {
    /// Next line, ended by `\n`, `\r\n` or a lone `\r`; a final break adds no empty line
    fn next_line(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() { return None; }
        let Some(i) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..i];
        let skip = if self.rest[i..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[i + skip..];
        Some(line)
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let line = self.next_line()?;
        Some(line.split(self.separator).map(str::to_owned).collect())
    }
}

/// Split `text` line by line, then each line on `separator`.
/// Fields are kept verbatim; a leading UTF-8 BOM is dropped.
pub fn rows(text: &str, separator: char) -> Rows<'_> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Rows { rest: text, separator }
}

/// Fetch resource `id` through `loader` and collect its rows.
pub fn read_rows(loader: &dyn ResourceLoader, id: &str, separator: char) -> Result<Vec<Row>> {
    let text = loader.load(id)?;
    let out: Vec<Row> = rows(&text, separator).collect();
    log::debug!("[csv] '{}' → {} rows", id, out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::source::MemoryLoader;
    use crate::l10n::L10nError;

    #[test]
    fn empty_input_has_no_rows() {
        assert_eq!(rows("", ',').count(), 0);
    }

    #[test]
    fn splits_lines_and_fields() {
        let got: Vec<Row> = rows(",en,jp\nhi,Hello,やあ\r\nbye,Bye,またね\n", ',').collect();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], vec!["", "en", "jp"]);
        assert_eq!(got[1], vec!["hi", "Hello", "やあ"]);
        assert_eq!(got[2], vec!["bye", "Bye", "またね"]);
    }

    #[test]
    fn keeps_whitespace_and_ignores_quotes() {
        let got: Vec<Row> = rows("k, \"a\" ,b ", ',').collect();
        assert_eq!(got[0], vec!["k", " \"a\" ", "b "]);
    }

    #[test]
    fn lone_carriage_return_breaks_lines() {
        let got: Vec<Row> = rows(",en,jp\rgreeting,Hello,こんにちは\rfarewell,Bye,さようなら\r", ',').collect();
        assert_eq!(got.len(), 3);
        assert_eq!(got[1], vec!["greeting", "Hello", "こんにちは"]);
        assert_eq!(got[2], vec!["farewell", "Bye", "さようなら"]);
    }

    #[test]
    fn mixed_line_endings() {
        let got: Vec<Row> = rows("a\r\nb\rc\nd", ',').collect();
        assert_eq!(got, vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]);
        // \r\n is one break, \n\r is two
        assert_eq!(rows("a\n\rb", ',').count(), 3);
    }

    #[test]
    fn custom_separator() {
        let got: Vec<Row> = rows("k;a,b;c", ';').collect();
        assert_eq!(got[0], vec!["k", "a,b", "c"]);
    }

    #[test]
    fn strips_bom() {
        let got: Vec<Row> = rows("\u{feff}label,en", ',').collect();
        assert_eq!(got[0][0], "label");
    }

    #[test]
    fn blank_line_is_single_empty_field() {
        let got: Vec<Row> = rows("a\n\nb", ',').collect();
        assert_eq!(got[1], vec![""]);
    }

    #[test]
    fn read_rows_reports_missing_resource() {
        let loader = MemoryLoader::default();
        let err = read_rows(&loader, "nope", ',').unwrap_err();
        assert!(matches!(err, L10nError::ResourceUnavailable { .. }));
    }
}
