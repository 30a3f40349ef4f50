//! A multi-keyword substring search engine built on the Aho-Corasick
//! automaton: given a finite set of nonempty keywords and an input
//! sequence, reports every `(keyword, start_offset)` occurrence, including
//! overlapping ones.
//!
//! Two domains are supported independently: opaque byte sequences ([`&[u8]`])
//! and code-point sequences ([`&str`]), with an optional case-insensitive
//! mode for text. Construction goes through [`KeywordStore`] /
//! [`AhoCorasickBuilder`] and produces an immutable, freely shareable
//! [`Automaton`]; scanning goes through [`Automaton::find_iter`],
//! [`Automaton::find_all`], or [`Automaton::stream_find_iter`] for chunked
//! sources.
//!
//! ```
//! use needleset::AhoCorasickBuilder;
//! use needleset::scanner::Input;
//!
//! let automaton = AhoCorasickBuilder::new(false)
//!     .add("ab").unwrap()
//!     .add("bc").unwrap()
//!     .build();
//!
//! let hits: Vec<_> = automaton
//!     .find_all(Input::Text("abc"))
//!     .into_iter()
//!     .map(|h| h.offset())
//!     .collect();
//! assert_eq!(hits, vec![0, 1]);
//! ```

mod automaton;
mod compiler;
mod error;
mod keyword;
mod keyword_store;
pub mod scanner;
pub mod stream;
mod symbol;
mod trie;

mod serialize;

pub use automaton::Automaton;
pub use error::{Domain, Error, Result};
pub use keyword::Keyword;
pub use keyword_store::KeywordStore;
pub use scanner::{FindIter, Input, MatchHit};
pub use stream::{ChunkSource, IoChunkSource, OwnedMatchHit, StreamFindIter, DEFAULT_CHUNK_SIZE};

/// Builder-style front door over [`KeywordStore`] and the Automaton
/// Compiler (§6 Construction API): `new_builder(ignore_case).add(k)...build()`.
pub struct AhoCorasickBuilder {
    store: KeywordStore,
}

impl AhoCorasickBuilder {
    pub fn new(ignore_case: bool) -> Self {
        AhoCorasickBuilder {
            store: KeywordStore::new(ignore_case),
        }
    }

    /// Adds a keyword, returning `self` for chaining. See
    /// [`KeywordStore::add`] for error conditions.
    pub fn add(mut self, keyword: impl Into<Keyword>) -> Result<Self> {
        self.store.add(keyword)?;
        Ok(self)
    }

    pub fn pattern_count(&self) -> usize {
        self.store.len()
    }

    /// Finalizes the accumulated keywords into an immutable [`Automaton`].
    pub fn build(self) -> Automaton {
        compiler::compile(self.store.freeze())
    }
}
