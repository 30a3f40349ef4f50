use crate::error::Domain;
use crate::keyword::Keyword;
use crate::scanner::{FindIter, Input};
use crate::symbol::Symbol;

/// The finalized transition table (§3, §9). Byte-domain automata use a
/// dense `state_count * 256` array for a single indexed lookup per symbol;
/// text-domain automata use a per-state sorted `(symbol, dest)` row searched
/// with binary search, since the alphabet (all Unicode scalar values) is far
/// too large to make dense tables practical.
#[derive(Debug, Clone)]
pub(crate) enum Transitions {
    Dense { table: Vec<u32> },
    Sparse { table: Vec<Vec<(Symbol, u32)>> },
}

impl Transitions {
    #[inline]
    pub(crate) fn next_state(&self, state: u32, sym: Symbol) -> u32 {
        match self {
            Transitions::Dense { table } => {
                if sym >= 256 {
                    // A byte-domain alphabet never emits a symbol outside
                    // 0..256; a code point that can't occur here just never
                    // advances past the root.
                    return 0;
                }
                table[state as usize * 256 + sym as usize]
            }
            Transitions::Sparse { table } => {
                let row = &table[state as usize];
                match row.binary_search_by_key(&sym, |&(s, _)| s) {
                    Ok(i) => row[i].1,
                    Err(_) => 0,
                }
            }
        }
    }
}

/// A finalized Aho-Corasick automaton: immutable, freely shareable across
/// concurrent scanners (§5). Build one via [`crate::AhoCorasickBuilder`], or
/// reload one from bytes via [`crate::Automaton::deserialize`].
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(crate) domain: Domain,
    pub(crate) ignore_case: bool,
    /// Pattern id -> original keyword, as added by the caller.
    pub(crate) keywords: Vec<Keyword>,
    /// Interned, longest-first (lexicographic tiebreak) pattern-id lists.
    pub(crate) match_pool: Vec<Vec<u32>>,
    /// Per state: index into `match_pool`.
    pub(crate) state_match_ids: Vec<u32>,
    pub(crate) state_count: u32,
    pub(crate) transitions: Transitions,
}

impl Automaton {
    pub(crate) fn from_parts(
        domain: Domain,
        ignore_case: bool,
        keywords: Vec<Keyword>,
        match_pool: Vec<Vec<u32>>,
        state_match_ids: Vec<u32>,
        state_count: u32,
        transitions: Transitions,
    ) -> Self {
        Automaton {
            domain,
            ignore_case,
            keywords,
            match_pool,
            state_match_ids,
            state_count,
            transitions,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn pattern_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn state_count(&self) -> usize {
        self.state_count as usize
    }

    pub(crate) fn keyword(&self, pattern_id: u32) -> &Keyword {
        &self.keywords[pattern_id as usize]
    }

    #[inline]
    pub(crate) fn transition(&self, state: u32, sym: Symbol) -> u32 {
        self.transitions.next_state(state, sym)
    }

    #[inline]
    pub(crate) fn matches_at(&self, state: u32) -> &[u32] {
        let list_id = self.state_match_ids[state as usize];
        &self.match_pool[list_id as usize]
    }

    /// Start state id, always 0.
    #[inline]
    pub(crate) fn start_state(&self) -> u32 {
        0
    }

    /// Approximate heap usage, useful for capacity planning (mirrors the
    /// teacher's `heap_bytes` diagnostic).
    pub fn heap_bytes(&self) -> usize {
        use std::mem::size_of;
        let keywords_bytes: usize = self
            .keywords
            .iter()
            .map(|k| k.raw_bytes().len() + size_of::<Keyword>())
            .sum();
        let pool_bytes: usize = self
            .match_pool
            .iter()
            .map(|l| l.len() * size_of::<u32>())
            .sum();
        let transitions_bytes = match &self.transitions {
            Transitions::Dense { table } => table.len() * size_of::<u32>(),
            Transitions::Sparse { table } => table
                .iter()
                .map(|row| row.len() * size_of::<(Symbol, u32)>())
                .sum(),
        };
        keywords_bytes + pool_bytes + transitions_bytes
    }

    /// Lazy sequence of matches found in `input` (§4.4).
    pub fn find_iter<'a>(&'a self, input: impl Into<Input<'a>>) -> FindIter<'a> {
        let input = input.into();
        input.assert_domain(self.domain);
        FindIter::new(self, input)
    }

    /// Eager concatenation of [`Automaton::find_iter`] (§4.4).
    pub fn find_all<'a>(&'a self, input: impl Into<Input<'a>>) -> Vec<crate::scanner::MatchHit<'a>> {
        self.find_iter(input).collect()
    }
}
