use crate::error::Domain;
use crate::symbol::{fold_lower, Symbol};

/// A single keyword as originally added to a [`crate::KeywordStore`].
///
/// This is the value reported back in a [`crate::MatchHit`]: it always
/// carries the case the caller added it with, even under `ignore_case`
/// search, so a match's keyword can be compared byte-for-byte against the
/// original input modulo explicit case folding (§8, soundness).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Bytes(Vec<u8>),
    Text(String),
}

impl Keyword {
    pub(crate) fn domain(&self) -> Domain {
        match self {
            Keyword::Bytes(_) => Domain::Byte,
            Keyword::Text(_) => Domain::Text,
        }
    }

    /// Number of symbols (bytes, or code points) this keyword spans.
    pub fn len(&self) -> usize {
        match self {
            Keyword::Bytes(b) => b.len(),
            Keyword::Text(s) => s.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn symbols(&self, ignore_case: bool) -> Vec<Symbol> {
        let domain = self.domain();
        match self {
            Keyword::Bytes(b) => b
                .iter()
                .map(|&b| {
                    let s = b as Symbol;
                    if ignore_case {
                        fold_lower(domain, s)
                    } else {
                        s
                    }
                })
                .collect(),
            Keyword::Text(s) => s
                .chars()
                .map(|c| {
                    let s = c as Symbol;
                    if ignore_case {
                        fold_lower(domain, s)
                    } else {
                        s
                    }
                })
                .collect(),
        }
    }

    /// Raw content bytes, used for the deterministic lexicographic tiebreak
    /// (§9 Open Questions) and for wire serialization (§6).
    pub(crate) fn raw_bytes(&self) -> &[u8] {
        match self {
            Keyword::Bytes(b) => b,
            Keyword::Text(s) => s.as_bytes(),
        }
    }

    pub(crate) fn from_raw(domain: Domain, bytes: Vec<u8>) -> crate::error::Result<Self> {
        match domain {
            Domain::Byte => Ok(Keyword::Bytes(bytes)),
            Domain::Text => String::from_utf8(bytes)
                .map(Keyword::Text)
                .map_err(|e| crate::error::Error::CorruptSerialization(e.to_string())),
        }
    }
}

impl From<Vec<u8>> for Keyword {
    fn from(b: Vec<u8>) -> Self {
        Keyword::Bytes(b)
    }
}

impl From<&[u8]> for Keyword {
    fn from(b: &[u8]) -> Self {
        Keyword::Bytes(b.to_vec())
    }
}

impl From<String> for Keyword {
    fn from(s: String) -> Self {
        Keyword::Text(s)
    }
}

impl From<&str> for Keyword {
    fn from(s: &str) -> Self {
        Keyword::Text(s.to_string())
    }
}
