use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{G2pError, G2pResult};

/// Old-to-new phoneme symbol mapping, loaded from a two-column
/// tab-separated file with one mapping per line. A symbol may appear at
/// most once as a key; symbols without a mapping pass through unchanged.
#[derive(Debug)]
pub struct PhonemeMap {
    mapping: HashMap<String, String>,
}

impl PhonemeMap {
    pub fn load(path: &Path) -> G2pResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(raw: &str) -> G2pResult<Self> {
        let mut mapping = HashMap::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let (old, new) = match (cols.next(), cols.next(), cols.next()) {
                (Some(old), Some(new), None) => (old, new),
                _ => return Err(G2pError::MalformedMapping { line: idx + 1 }),
            };
            if mapping.insert(old.to_string(), new.to_string()).is_some() {
                return Err(G2pError::DuplicateMapping(old.to_string()));
            }
        }
        Ok(Self { mapping })
    }

    pub fn remap_symbol<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.mapping.get(symbol).map(String::as_str).unwrap_or(symbol)
    }

    /// Rewrite each space-separated symbol of a pronunciation.
    pub fn remap_pronunciation(&self, pronunciation: &str) -> String {
        pronunciation
            .split_whitespace()
            .map(|symbol| self.remap_symbol(symbol))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaps_known_symbols_and_passes_unknown_through() {
        let map = PhonemeMap::parse("E\tɛ\nY\tʏ\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.remap_pronunciation("h E s t Y r"), "h ɛ s t ʏ r");
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let err = PhonemeMap::parse("E\tɛ\nE\te\n").unwrap_err();
        assert!(matches!(err, G2pError::DuplicateMapping(symbol) if symbol == "E"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = PhonemeMap::parse("E\tɛ\nno-tab-here\n").unwrap_err();
        assert!(matches!(err, G2pError::MalformedMapping { line: 2 }));
    }

    #[test]
    fn test_extra_column_is_malformed() {
        assert!(PhonemeMap::parse("E\tɛ\textra\n").is_err());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let map = PhonemeMap::parse("\nE\tɛ\n\n").unwrap();
        assert_eq!(map.len(), 1);
    }
}
