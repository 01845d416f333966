//! Code-to-key lookup table
//!
//! Maps validated 32-bit codes to display text. An absent entry means the
//! code is unrecognized, which is not an error; whether unrecognized codes
//! are dropped or shown raw is the consumer's policy.

use crate::types::{Code, DecoderError, Result};
use std::collections::HashMap;

/// Display text the built-in table maps the EXIT key to
pub const EXIT_KEY: &str = "<EXIT>";

/// Static mapping from decoded codes to display text
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    map: HashMap<Code, String>,
}

impl KeyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference table for the Samsung TV remote
    pub fn samsung() -> Self {
        let mut table = Self::new();
        table.insert(Code(0xE0E040BF), "\n<POWER>\n");
        table.insert(Code(0xE0E08877), "0");
        table.insert(Code(0xE0E020DF), "1");
        table.insert(Code(0xE0E0A05F), "2");
        table.insert(Code(0xE0E0609F), "3");
        table.insert(Code(0xE0E010EF), "4");
        table.insert(Code(0xE0E0906F), "5");
        table.insert(Code(0xE0E050AF), "6");
        table.insert(Code(0xE0E030CF), "7");
        table.insert(Code(0xE0E0B04F), "8");
        table.insert(Code(0xE0E0708F), "9");
        table.insert(Code(0xE0E0B44B), "\n<EXIT>\n");
        table.insert(Code(0xE0E01AE5), "\n<RETURN>\n");
        table.insert(Code(0xE0E0F00F), "\n<MUTE>\n");
        table
    }

    /// Build a table from `(hex code, display text)` string pairs
    ///
    /// Codes accept an optional `0x`/`0X` prefix, e.g. `"0xE0E040BF"`.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        table.extend_from_entries(entries)?;
        Ok(table)
    }

    /// Add `(hex code, display text)` pairs, replacing existing entries
    pub fn extend_from_entries<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, text) in entries {
            let code = parse_code(key.as_ref())?;
            self.map.insert(code, text.into());
        }
        Ok(())
    }

    /// Insert or replace one entry
    pub fn insert(&mut self, code: Code, text: impl Into<String>) {
        self.map.insert(code, text.into());
    }

    /// Look up the display text for a code
    pub fn lookup(&self, code: Code) -> Option<&str> {
        self.map.get(&code).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Parse a `"0xE0E040BF"`-style hex code
fn parse_code(s: &str) -> Result<Code> {
    let digits = s
        .trim()
        .strip_prefix("0x")
        .or_else(|| s.trim().strip_prefix("0X"))
        .unwrap_or_else(|| s.trim());

    u32::from_str_radix(digits, 16)
        .map(Code)
        .map_err(|_| DecoderError::KeyTable(format!("`{}` is not a 32-bit hex code", s)))
}
