//! Character code table.
//!
//! A font's character codes are byte sequences of varying length (1 byte for
//! simple fonts, usually 2 for composite fonts, up to 4 in general). The
//! table maps each code to exactly one Unicode scalar and each scalar back to
//! exactly one code, so text can be both decoded and re-encoded.

use crate::config::DuplicatePolicy;
use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// An immutable character code: the raw bytes of one code in a text string.
///
/// Two sequences are equal iff they have the same length and bytes, so
/// `<41>` and `<0041>` are different codes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteSequence(Vec<u8>);

impl ByteSequence {
    /// Build a code of `len` bytes holding `value` big-endian.
    ///
    /// High-order bytes that do not fit in `len` are dropped.
    pub fn from_value(value: u32, len: usize) -> Self {
        let bytes = (0..len)
            .rev()
            .map(|i| if i < 4 { (value >> (8 * i)) as u8 } else { 0 })
            .collect();
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Big-endian integer value (CID under Identity encodings).
    pub fn value(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |acc, &b| acc.wrapping_shl(8) | b as u32)
    }

    /// Upper-case hex rendering, as written in CMap files.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02X}", b)).collect()
    }
}

impl fmt::Debug for ByteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.to_hex())
    }
}

impl Borrow<[u8]> for ByteSequence {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for ByteSequence {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for ByteSequence {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for ByteSequence {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<u8> for ByteSequence {
    fn from(byte: u8) -> Self {
        Self(vec![byte])
    }
}

/// Bidirectional, one-to-one table between character codes and Unicode
/// scalars.
///
/// Both directions are kept in sync by a single insertion path; neither side
/// can ever hold a duplicate.
#[derive(Debug, Clone, Default)]
pub struct CodeMap {
    unicode_by_code: HashMap<ByteSequence, char>,
    code_by_unicode: HashMap<char, ByteSequence>,
    max_code_length: usize,
}

impl CodeMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw pairs, resolving conflicts with `policy`.
    pub fn from_pairs<I>(pairs: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (ByteSequence, char)>,
    {
        let mut map = Self::new();
        for (code, unicode) in pairs {
            map.insert_with_policy(code, unicode, policy)?;
        }
        Ok(map)
    }

    /// Insert a mapping, rejecting anything that would break uniqueness.
    ///
    /// Re-inserting an identical pair is a no-op. On error the table is left
    /// unchanged.
    pub fn insert(&mut self, code: impl Into<ByteSequence>, unicode: char) -> Result<()> {
        self.insert_with_policy(code.into(), unicode, DuplicatePolicy::Reject)
            .map(|_| ())
    }

    /// Insert a mapping, resolving conflicts with `policy`.
    ///
    /// Returns whether the pair is present in the table afterwards.
    pub fn insert_with_policy(
        &mut self,
        code: ByteSequence,
        unicode: char,
        policy: DuplicatePolicy,
    ) -> Result<bool> {
        let code_taken = self.unicode_by_code.get(&code).copied();
        let unicode_taken = self.code_by_unicode.get(&unicode).cloned();

        if code_taken == Some(unicode) {
            return Ok(true);
        }
        if code_taken.is_none() && unicode_taken.is_none() {
            self.store(code, unicode);
            return Ok(true);
        }

        match policy {
            DuplicatePolicy::Reject => Err(Error::DuplicateMappingEntry {
                code: code.to_hex(),
                unicode,
            }),
            DuplicatePolicy::KeepFirst => {
                log::warn!(
                    "Skipping code table entry {:?} -> {:?}: conflicts with existing mapping",
                    code,
                    unicode
                );
                Ok(false)
            },
            DuplicatePolicy::KeepLast => {
                if let Some(old_unicode) = code_taken {
                    self.code_by_unicode.remove(&old_unicode);
                    self.unicode_by_code.remove(&code);
                }
                if let Some(old_code) = unicode_taken {
                    self.unicode_by_code.remove(&old_code);
                    self.code_by_unicode.remove(&unicode);
                }
                log::debug!("Replaced conflicting mapping with {:?} -> {:?}", code, unicode);
                self.store(code, unicode);
                self.max_code_length = self.unicode_by_code.keys().map(|c| c.len()).max().unwrap_or(0);
                Ok(true)
            },
        }
    }

    fn store(&mut self, code: ByteSequence, unicode: char) {
        self.max_code_length = self.max_code_length.max(code.len());
        self.code_by_unicode.insert(unicode, code.clone());
        self.unicode_by_code.insert(code, unicode);
    }

    /// Unicode scalar for a character code.
    pub fn get(&self, code: &[u8]) -> Option<char> {
        self.unicode_by_code.get(code).copied()
    }

    /// Character code for a Unicode scalar.
    pub fn code_for(&self, unicode: char) -> Option<&ByteSequence> {
        self.code_by_unicode.get(&unicode)
    }

    /// All character codes in the table.
    pub fn codes(&self) -> impl Iterator<Item = &ByteSequence> {
        self.unicode_by_code.keys()
    }

    /// All `(code, scalar)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ByteSequence, char)> {
        self.unicode_by_code.iter().map(|(code, &unicode)| (code, unicode))
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.unicode_by_code.len()
    }

    /// Whether the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.unicode_by_code.is_empty()
    }

    /// Byte length of the longest code (0 for an empty table).
    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }
}
