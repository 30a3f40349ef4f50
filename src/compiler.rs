use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::info;

use crate::automaton::{Automaton, Transitions};
use crate::error::Domain;
use crate::keyword::Keyword;
use crate::symbol::{upper_variant, Symbol};
use crate::trie::Trie;

const ROOT: usize = 0;

/// Looks up the effective child of `node` on `c`, falling back to `c`'s
/// uppercase form when `ignore_case` is set (§4.3 step 1: "or, when ignoring
/// case and c has a distinct uppercase form, on the upper form"). Trie edges
/// are always stored lower-folded (§4.2), so this fallback is the only place
/// the uppercase alternative is consulted during failure-link assignment.
fn child_of(
    node: &BTreeMap<Symbol, usize>,
    domain: Domain,
    ignore_case: bool,
    c: Symbol,
) -> Option<usize> {
    if let Some(&id) = node.get(&c) {
        return Some(id);
    }
    if ignore_case {
        if let Some(u) = upper_variant(domain, c) {
            if let Some(&id) = node.get(&u) {
                return Some(id);
            }
        }
    }
    None
}

/// Computes failure links by breadth-first traversal (§4.3 step 1). Returns
/// `fail[state] = ancestor state id`; `fail[ROOT] == ROOT`.
fn compute_fail_links(trie: &Trie) -> Vec<usize> {
    let mut fail = vec![ROOT; trie.nodes.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (&_c, &child) in &trie.nodes[ROOT].children {
        fail[child] = ROOT;
        queue.push_back(child);
    }

    while let Some(u) = queue.pop_front() {
        for (&c, &v) in &trie.nodes[u].children {
            queue.push_back(v);

            let mut f = fail[u];
            loop {
                if let Some(target) = child_of(&trie.nodes[f].children, trie.domain, trie.ignore_case, c) {
                    fail[v] = target;
                    break;
                }
                if f == ROOT {
                    fail[v] = ROOT;
                    break;
                }
                f = fail[f];
            }
        }
    }

    fail
}

/// Merges every (symbol, child) edge of `node`, plus (for `ignore_case`) its
/// synthesized uppercase alternatives, into `effective` without overwriting
/// entries already present — callers walk from nearest to farthest ancestor,
/// so nearer edges always win (§4.3 step 2).
fn merge_edges(
    effective: &mut BTreeMap<Symbol, usize>,
    node: &BTreeMap<Symbol, usize>,
    domain: Domain,
    ignore_case: bool,
) {
    for (&c, &child) in node {
        effective.entry(c).or_insert(child);
    }
    if ignore_case {
        for (&c, &child) in node {
            if let Some(u) = upper_variant(domain, c) {
                if u != c {
                    effective.entry(u).or_insert(child);
                }
            }
        }
    }
}

/// Sorts a state's match list longest-first, with ties broken
/// lexicographically by keyword bytes (§4.3, §9 Open Questions), then
/// removes duplicates (a pattern can only be reached once along a failure
/// chain, so this is defensive).
fn sort_match_list(list: &mut Vec<u32>, keywords: &[Keyword]) {
    list.sort_by(|&a, &b| {
        let ka = &keywords[a as usize];
        let kb = &keywords[b as usize];
        kb.len()
            .cmp(&ka.len())
            .then_with(|| ka.raw_bytes().cmp(kb.raw_bytes()))
    });
    list.dedup();
}

/// Computes a full deterministic automaton with failure links collapsed
/// into a precomputed goto table (§4.3). This is the Automaton Compiler.
pub(crate) fn compile(trie: Trie) -> Automaton {
    let state_count = trie.nodes.len();
    let fail = compute_fail_links(&trie);

    let mut state_match_ids: Vec<u32> = Vec::with_capacity(state_count);
    let mut pool: HashMap<Vec<u32>, u32> = HashMap::new();
    let mut pool_lists: Vec<Vec<u32>> = Vec::new();

    let mut edges_per_state: Vec<Vec<(Symbol, usize)>> = Vec::with_capacity(state_count);

    for s in 0..state_count {
        let mut effective: BTreeMap<Symbol, usize> = BTreeMap::new();
        merge_edges(&mut effective, &trie.nodes[s].children, trie.domain, trie.ignore_case);

        let mut match_list: Vec<u32> = trie.nodes[s].matches.clone();

        if s != ROOT {
            let mut f = fail[s];
            loop {
                merge_edges(&mut effective, &trie.nodes[f].children, trie.domain, trie.ignore_case);
                match_list.extend(trie.nodes[f].matches.iter().copied());
                if f == ROOT {
                    break;
                }
                f = fail[f];
            }
        }

        sort_match_list(&mut match_list, &trie.keywords);

        let list_id = *pool.entry(match_list.clone()).or_insert_with(|| {
            let id = pool_lists.len() as u32;
            pool_lists.push(match_list);
            id
        });
        state_match_ids.push(list_id);

        edges_per_state.push(effective.into_iter().collect());
    }

    let transitions = match trie.domain {
        Domain::Byte => {
            let mut table = vec![0u32; state_count * 256];
            for (s, edges) in edges_per_state.iter().enumerate() {
                for &(sym, dest) in edges {
                    table[s * 256 + sym as usize] = dest as u32;
                }
            }
            Transitions::Dense { table }
        }
        Domain::Text => {
            let table: Vec<Vec<(Symbol, u32)>> = edges_per_state
                .into_iter()
                .map(|edges| edges.into_iter().map(|(sym, dest)| (sym, dest as u32)).collect())
                .collect();
            Transitions::Sparse { table }
        }
    };

    info!(
        states = state_count,
        transitions = pool_lists.len(),
        keywords = trie.keywords.len(),
        "automaton compiled"
    );

    Automaton::from_parts(
        trie.domain,
        trie.ignore_case,
        trie.keywords,
        pool_lists,
        state_match_ids,
        state_count as u32,
        transitions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword_store::KeywordStore;

    fn build(keywords: &[&str], ignore_case: bool) -> Automaton {
        let mut store = KeywordStore::new(ignore_case);
        for k in keywords {
            store.add(*k).unwrap();
        }
        compile(store.freeze())
    }

    #[test]
    fn empty_keyword_set_compiles_to_lone_root() {
        let store = KeywordStore::new(false);
        let automaton = compile(store.freeze());
        assert_eq!(automaton.state_count(), 1);
        // An empty KeywordStore has never seen a keyword, so Trie::build
        // defaults its domain to Byte (trie.rs) — scan with Bytes input
        // to match, not Text.
        assert!(automaton.find_all(crate::scanner::Input::Bytes(b"abc")).is_empty());
    }

    #[test]
    fn scenario_1() {
        let automaton = build(&["ab", "bc", "de", "a", "b"], false);
        let hits = automaton.find_all(crate::scanner::Input::Text("abc"));
        let got: Vec<(String, usize)> = hits
            .into_iter()
            .map(|h| (String::from_utf8(h.keyword().raw_bytes().to_vec()).unwrap(), h.offset()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("a".into(), 0),
                ("ab".into(), 0),
                ("b".into(), 1),
                ("bc".into(), 1),
            ]
        );
    }

    #[test]
    fn scenario_4_overlap_longest_first() {
        let automaton = build(&["d", "cd", "bcd", "abcd"], false);
        let hits = automaton.find_all(crate::scanner::Input::Text("abcd"));
        let got: Vec<(String, usize)> = hits
            .into_iter()
            .map(|h| (String::from_utf8(h.keyword().raw_bytes().to_vec()).unwrap(), h.offset()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("abcd".into(), 0),
                ("bcd".into(), 1),
                ("cd".into(), 2),
                ("d".into(), 3),
            ]
        );
    }
}
