//! Wire format for a finalized [`Automaton`] (§4.6, §6).
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! magic            [u8; 4]   b"AC01"
//! flags            u8        bit0 = ignore_case, bit1 = text_mode
//! state_count      u32
//! for each state:
//!   match_count    u32
//!   for each match: keyword_length u32, keyword bytes
//! transition_count u32
//! for each transition:
//!   source_state   u32
//!   symbol         u32 (text mode) or u8 (byte mode)
//!   dest_state     u32
//!   match_list_idx u32  (= dest_state; see DESIGN.md)
//! ```

use crate::automaton::{Automaton, Transitions};
use crate::error::{Domain, Error, Result};
use crate::keyword::Keyword;

const MAGIC: &[u8; 4] = b"AC01";
const FLAG_IGNORE_CASE: u8 = 0b01;
const FLAG_TEXT_MODE: u8 = 0b10;

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Writer { buf: Vec::new() }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(Error::CorruptSerialization(format!(
                "unexpected end of buffer: needed {n} bytes at offset {}, only {} remain",
                self.pos,
                self.buf.len() - self.pos
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

impl Automaton {
    /// Serializes this automaton to the `AC01` wire format (§6).
    pub fn serialize(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.bytes(MAGIC);

        let mut flags = 0u8;
        if self.ignore_case {
            flags |= FLAG_IGNORE_CASE;
        }
        if self.domain == Domain::Text {
            flags |= FLAG_TEXT_MODE;
        }
        w.u8(flags);

        w.u32(self.state_count);
        for state in 0..self.state_count {
            let list = &self.match_pool[self.state_match_ids[state as usize] as usize];
            w.u32(list.len() as u32);
            for &pattern_id in list {
                let kw = &self.keywords[pattern_id as usize];
                let raw = kw.raw_bytes();
                w.u32(raw.len() as u32);
                w.bytes(raw);
            }
        }

        let transitions: Vec<(u32, u32, u32)> = match &self.transitions {
            Transitions::Dense { table } => table
                .iter()
                .enumerate()
                // Entries pointing at the root (0) are the reload-time
                // default (the table is zero-initialized), so omitting them
                // keeps the file compact without losing information.
                .filter(|&(_, &dest)| dest != 0)
                .map(|(idx, &dest)| {
                    let state = (idx / 256) as u32;
                    let symbol = (idx % 256) as u32;
                    (state, symbol, dest)
                })
                .collect(),
            Transitions::Sparse { table } => table
                .iter()
                .enumerate()
                .flat_map(|(state, row)| {
                    row.iter()
                        .map(move |&(symbol, dest)| (state as u32, symbol, dest))
                })
                .collect(),
        };

        w.u32(transitions.len() as u32);
        let text_mode = self.domain == Domain::Text;
        for (source, symbol, dest) in transitions {
            w.u32(source);
            if text_mode {
                w.u32(symbol);
            } else {
                w.u8(symbol as u8);
            }
            w.u32(dest);
            w.u32(self.state_match_ids[dest as usize]);
        }

        w.buf
    }

    /// Reconstructs an automaton from bytes produced by
    /// [`Automaton::serialize`]. Fails with [`Error::CorruptSerialization`]
    /// if the magic, version, or structure is invalid (§7).
    pub fn deserialize(buf: &[u8]) -> Result<Automaton> {
        let mut r = Reader::new(buf);
        let magic = r.take(4)?;
        if magic != MAGIC {
            return Err(Error::CorruptSerialization(format!(
                "bad magic: expected {MAGIC:?}, found {magic:?}"
            )));
        }

        let flags = r.u8()?;
        let ignore_case = flags & FLAG_IGNORE_CASE != 0;
        let domain = if flags & FLAG_TEXT_MODE != 0 {
            Domain::Text
        } else {
            Domain::Byte
        };

        let state_count = r.u32()?;

        // Rebuild the keyword pool by dedup-on-content, preserving
        // first-seen order so per-state match lists keep their file order.
        let mut keywords: Vec<Keyword> = Vec::new();
        let mut seen: std::collections::HashMap<Vec<u8>, u32> = std::collections::HashMap::new();
        let mut state_pattern_lists: Vec<Vec<u32>> = Vec::with_capacity(state_count as usize);

        for _ in 0..state_count {
            let match_count = r.u32()?;
            let mut ids = Vec::with_capacity(match_count as usize);
            for _ in 0..match_count {
                let len = r.u32()? as usize;
                let raw = r.take(len)?.to_vec();
                let id = match seen.get(&raw) {
                    Some(&id) => id,
                    None => {
                        let id = keywords.len() as u32;
                        keywords.push(Keyword::from_raw(domain, raw.clone())?);
                        seen.insert(raw, id);
                        id
                    }
                };
                ids.push(id);
            }
            state_pattern_lists.push(ids);
        }

        let mut pool: std::collections::HashMap<Vec<u32>, u32> = std::collections::HashMap::new();
        let mut pool_lists: Vec<Vec<u32>> = Vec::new();
        let mut state_match_ids: Vec<u32> = Vec::with_capacity(state_count as usize);
        for list in &state_pattern_lists {
            let id = *pool.entry(list.clone()).or_insert_with(|| {
                let id = pool_lists.len() as u32;
                pool_lists.push(list.clone());
                id
            });
            state_match_ids.push(id);
        }

        let transition_count = r.u32()?;
        let transitions = match domain {
            Domain::Byte => {
                let mut table = vec![0u32; state_count as usize * 256];
                for _ in 0..transition_count {
                    let source = r.u32()?;
                    let symbol = r.u8()? as u32;
                    let dest = r.u32()?;
                    let _match_list_idx = r.u32()?;
                    let idx = source as usize * 256 + symbol as usize;
                    *table.get_mut(idx).ok_or_else(|| {
                        Error::CorruptSerialization("transition source state out of range".into())
                    })? = dest;
                }
                Transitions::Dense { table }
            }
            Domain::Text => {
                let mut table: Vec<Vec<(u32, u32)>> = vec![Vec::new(); state_count as usize];
                for _ in 0..transition_count {
                    let source = r.u32()?;
                    let symbol = r.u32()?;
                    let dest = r.u32()?;
                    let _match_list_idx = r.u32()?;
                    let row = table.get_mut(source as usize).ok_or_else(|| {
                        Error::CorruptSerialization("transition source state out of range".into())
                    })?;
                    row.push((symbol, dest));
                }
                for row in &mut table {
                    row.sort_by_key(|&(sym, _)| sym);
                }
                Transitions::Sparse { table }
            }
        };

        Ok(Automaton::from_parts(
            domain,
            ignore_case,
            keywords,
            pool_lists,
            state_match_ids,
            state_count,
            transitions,
        ))
    }
}
