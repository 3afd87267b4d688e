use std::fmt;
use std::io::Write;
use std::ops::RangeInclusive;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::MeasureError;

/// Printable ASCII, space (U+0020) through tilde (U+007E).
pub const PRINTABLE_ASCII: RangeInclusive<char> = ' '..='~';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharWidth {
    pub ch: char,
    /// Advance width in pixels.
    pub width: f64,
}

/// Character widths in ascending code point order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidthTable {
    entries: Vec<CharWidth>,
}

impl WidthTable {
    pub(crate) fn with_capacity(capacity: usize) -> WidthTable {
        WidthTable {
            entries: Vec::with_capacity(capacity),
        }
    }

    // Callers iterate a range once, so keys never repeat.
    pub(crate) fn push(&mut self, ch: char, width: f64) {
        debug_assert!(self.get(ch).is_none(), "duplicate entry for {:?}", ch);
        self.entries.push(CharWidth { ch, width });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width of `ch` in pixels, if it is in the table.
    pub fn get(&self, ch: char) -> Option<f64> {
        self.entries.iter().find(|e| e.ch == ch).map(|e| e.width)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CharWidth> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CharWidth] {
        &self.entries
    }

    /// True when every ASCII letter and digit in the table has the same width.
    pub fn is_monospace(&self) -> bool {
        let mut widths = self
            .entries
            .iter()
            .filter(|e| e.ch.is_ascii_alphanumeric())
            .map(|e| e.width);
        match widths.next() {
            Some(first) => widths.all(|w| w == first),
            None => false,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, MeasureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), MeasureError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Serialize for WidthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.ch, &entry.width)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a WidthTable {
    type Item = &'a CharWidth;
    type IntoIter = std::slice::Iter<'a, CharWidth>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for WidthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_pretty().map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(char, f64)]) -> WidthTable {
        let mut table = WidthTable::with_capacity(pairs.len());
        for &(ch, width) in pairs {
            table.push(ch, width);
        }
        table
    }

    #[test]
    fn test_printable_ascii_bounds() {
        assert_eq!(*PRINTABLE_ASCII.start() as u32, 32);
        assert_eq!(*PRINTABLE_ASCII.end() as u32, 126);
        assert_eq!(PRINTABLE_ASCII.count(), 95);
    }

    #[test]
    fn test_json_keeps_insertion_order_and_indent() {
        let t = table(&[(' ', 3.5), ('"', 4.0), ('\\', 4.25), ('a', 7.0)]);
        let json = t.to_json_pretty().unwrap();
        assert_eq!(
            json,
            "{\n  \" \": 3.5,\n  \"\\\"\": 4.0,\n  \"\\\\\": 4.25,\n  \"a\": 7.0\n}"
        );
    }

    #[test]
    fn test_empty_table_json() {
        let t = WidthTable::default();
        assert!(t.is_empty());
        assert_eq!(t.to_json_pretty().unwrap(), "{}");
    }

    #[test]
    fn test_write_json_appends_newline() {
        let t = table(&[('x', 6.0)]);
        let mut buf = Vec::new();
        t.write_json(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"x\": 6.0\n}\n");
    }

    #[test]
    fn test_display_matches_json() {
        let t = table(&[('i', 3.0), ('W', 11.5)]);
        assert_eq!(t.to_string(), t.to_json_pretty().unwrap());
    }

    #[test]
    fn test_get_and_len() {
        let t = table(&[('A', 8.0), ('B', 8.5)]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get('B'), Some(8.5));
        assert_eq!(t.get('C'), None);
        let chars: Vec<char> = t.iter().map(|e| e.ch).collect();
        assert_eq!(chars, vec!['A', 'B']);
    }

    #[test]
    fn test_is_monospace() {
        assert!(table(&[(' ', 2.0), ('a', 7.0), ('1', 7.0), ('.', 3.0)]).is_monospace());
        assert!(!table(&[('i', 3.0), ('W', 11.0)]).is_monospace());
        assert!(!table(&[(' ', 2.0), ('.', 3.0)]).is_monospace());
    }
}
