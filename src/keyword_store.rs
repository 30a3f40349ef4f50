use std::collections::HashSet;

use tracing::debug;

use crate::error::{Domain, Error, Result};
use crate::keyword::Keyword;
use crate::trie::Trie;

/// Accumulates keywords of a single domain (bytes xor text) with a chosen
/// case-sensitivity flag (§4.1). Single-owner, mutable; no concurrent access
/// during construction (§5).
#[derive(Debug, Default)]
pub struct KeywordStore {
    ignore_case: bool,
    domain: Option<Domain>,
    keywords: Vec<Keyword>,
    seen: HashSet<Keyword>,
}

impl KeywordStore {
    /// Creates an empty store. `ignore_case` only takes effect for
    /// text-domain keywords added later (byte-domain `ignore_case` applies
    /// ASCII-only folding; see §6).
    pub fn new(ignore_case: bool) -> Self {
        KeywordStore {
            ignore_case,
            domain: None,
            keywords: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Appends a keyword. Fails with [`Error::EmptyKeyword`] for a
    /// zero-length keyword, or [`Error::DomainMismatch`] if this keyword's
    /// symbol kind differs from the domain fixed by the first successful
    /// `add`. Duplicate keywords are idempotent (§4.1): re-adding one that
    /// already exists, verbatim, is a no-op rather than an error.
    pub fn add(&mut self, keyword: impl Into<Keyword>) -> Result<&mut Self> {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }
        let found = keyword.domain();
        match self.domain {
            None => self.domain = Some(found),
            Some(expected) if expected != found => {
                return Err(Error::DomainMismatch { expected, found })
            }
            Some(_) => {}
        }

        if self.seen.insert(keyword.clone()) {
            debug!(domain = ?found, total = self.keywords.len() + 1, "keyword added");
            self.keywords.push(keyword);
        }
        Ok(self)
    }

    /// Returns the accumulated trie. The store is left untouched; adding
    /// more keywords afterwards does not invalidate a trie or automaton
    /// already built from a prior freeze (§3 Lifecycle).
    pub fn freeze(&self) -> Trie {
        debug!(
            keywords = self.keywords.len(),
            ignore_case = self.ignore_case,
            "freezing keyword store into trie"
        );
        Trie::build(self.keywords.clone(), self.ignore_case)
    }
}
