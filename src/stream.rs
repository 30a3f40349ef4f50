use tracing::{error, trace};

use crate::automaton::Automaton;
use crate::error::{Domain, Error};
use crate::keyword::Keyword;
use crate::scanner::MatchHit;
use crate::symbol::Symbol;

/// Default chunk size for [`Automaton::stream_find_iter`] (§4.5).
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// The abstract byte-chunk source the Stream Driver reads from. The core
/// never performs I/O itself (§1 scope, §5): this trait is the seam a
/// caller plugs a file, socket, or in-memory buffer into.
///
/// In text mode, each chunk must end on a UTF-8 code point boundary (§4.5);
/// a source that would otherwise split a multi-byte code point across a
/// chunk must buffer internally before returning.
pub trait ChunkSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fills `buf` with up to `buf.len()` bytes, returning the number
    /// actually read. Returns `Ok(0)` only at end of input.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Adapts any [`std::io::Read`] into a [`ChunkSource`], for callers reading
/// from files or sockets.
pub struct IoChunkSource<R> {
    inner: R,
}

impl<R: std::io::Read> IoChunkSource<R> {
    pub fn new(inner: R) -> Self {
        IoChunkSource { inner }
    }
}

impl<R: std::io::Read> ChunkSource for IoChunkSource<R> {
    type Error = std::io::Error;

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf)
    }
}

/// Wraps [`crate::scanner::FindIter`] with a fixed-size read loop that
/// preserves a global offset across chunks (§4.5). The automaton state
/// persists across chunk boundaries, so keywords straddling them are
/// detected correctly (§8 property 5, stream equivalence).
pub struct StreamFindIter<'a, C: ChunkSource> {
    automaton: &'a Automaton,
    source: C,
    chunk_size: usize,
    buf: Vec<u8>,
    state: u32,
    base_offset: usize,
    chunk_symbols: Vec<Symbol>,
    cursor: usize,
    pos_in_chunk: usize,
    pending: std::slice::Iter<'a, u32>,
    pending_end: usize,
    finished: bool,
}

impl<'a, C: ChunkSource> StreamFindIter<'a, C> {
    pub(crate) fn new(automaton: &'a Automaton, source: C, chunk_size: usize) -> Self {
        StreamFindIter {
            automaton,
            source,
            chunk_size,
            buf: vec![0u8; chunk_size],
            state: automaton.start_state(),
            base_offset: 0,
            chunk_symbols: Vec::new(),
            cursor: 0,
            pos_in_chunk: 0,
            pending: [].iter(),
            pending_end: 0,
            finished: false,
        }
    }

    fn decode_chunk(&self, bytes: &[u8]) -> Vec<Symbol> {
        match self.automaton.domain() {
            Domain::Byte => bytes.iter().map(|&b| b as Symbol).collect(),
            Domain::Text => {
                let s = std::str::from_utf8(bytes).unwrap_or_else(|e| {
                    panic!(
                        "stream chunk did not end on a UTF-8 code point boundary: {e}"
                    )
                });
                s.chars().map(|c| c as Symbol).collect()
            }
        }
    }

    /// Pulls the next chunk from the source, returning `false` at EOF.
    fn advance_chunk(&mut self) -> Result<bool, Error> {
        let n = self.source.read_chunk(&mut self.buf).map_err(|e| {
            error!(error = %e, "stream read failed");
            Error::StreamReadError(Box::new(e))
        })?;
        trace!(bytes = n, base_offset = self.base_offset, "read stream chunk");
        if n == 0 {
            return Ok(false);
        }
        self.base_offset += self.pos_in_chunk;
        self.chunk_symbols = self.decode_chunk(&self.buf[..n]);
        self.cursor = 0;
        self.pos_in_chunk = 0;
        Ok(true)
    }
}

/// Owned match, used by the Stream Driver: keyword content is cloned rather
/// than borrowed since a [`StreamFindIter`] mutably owns its chunk buffers
/// and there is no single input slice to borrow from.
#[derive(Clone, Debug)]
pub struct OwnedMatchHit {
    keyword: Keyword,
    offset: usize,
}

impl OwnedMatchHit {
    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn end(&self) -> usize {
        self.offset + self.keyword.len()
    }
}

impl<'a> From<MatchHit<'a>> for OwnedMatchHit {
    fn from(hit: MatchHit<'a>) -> Self {
        OwnedMatchHit {
            keyword: hit.keyword().clone(),
            offset: hit.offset(),
        }
    }
}

impl<'a, C: ChunkSource> Iterator for StreamFindIter<'a, C> {
    type Item = Result<OwnedMatchHit, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(&pattern_id) = self.pending.next() {
                let keyword = self.automaton.keyword(pattern_id).clone();
                let offset = self.pending_end - keyword.len();
                return Some(Ok(OwnedMatchHit { keyword, offset }));
            }

            if self.cursor >= self.chunk_symbols.len() {
                match self.advance_chunk() {
                    Ok(true) => continue,
                    Ok(false) => {
                        self.finished = true;
                        return None;
                    }
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(e));
                    }
                }
            }

            let sym = self.chunk_symbols[self.cursor];
            self.cursor += 1;
            self.pos_in_chunk += 1;
            self.state = self.automaton.transition(self.state, sym);

            self.pending = self.automaton.matches_at(self.state).iter();
            self.pending_end = self.base_offset + self.pos_in_chunk;
        }
    }
}

impl Automaton {
    /// Lazy sequence of matches over a chunked input source, preserving a
    /// cumulative offset across chunks (§4.5, §6).
    pub fn stream_find_iter<C: ChunkSource>(&self, source: C) -> StreamFindIter<'_, C> {
        StreamFindIter::new(self, source, DEFAULT_CHUNK_SIZE)
    }

    /// As [`Automaton::stream_find_iter`], with an explicit chunk size.
    pub fn stream_find_iter_with_chunk_size<C: ChunkSource>(
        &self,
        source: C,
        chunk_size: usize,
    ) -> StreamFindIter<'_, C> {
        StreamFindIter::new(self, source, chunk_size)
    }
}
