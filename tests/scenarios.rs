use needleset::scanner::Input;
use needleset::{AhoCorasickBuilder, Keyword};

fn match_pairs(automaton: &needleset::Automaton, input: Input) -> Vec<(String, usize)> {
    automaton
        .find_all(input)
        .into_iter()
        .map(|h| {
            let text = match h.keyword() {
                Keyword::Text(s) => s.clone(),
                Keyword::Bytes(b) => String::from_utf8(b.clone()).unwrap(),
            };
            (text, h.offset())
        })
        .collect()
}

fn build(keywords: &[&str], ignore_case: bool) -> needleset::Automaton {
    let mut builder = AhoCorasickBuilder::new(ignore_case);
    for k in keywords {
        builder = builder.add(*k).unwrap();
    }
    builder.build()
}

#[test]
fn scenario_1() {
    let automaton = build(&["ab", "bc", "de", "a", "b"], false);
    let got = match_pairs(&automaton, Input::Text("abc"));
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
fn scenario_2() {
    let automaton = build(&["ab", "bc", "de", "a", "b"], false);
    let got = match_pairs(&automaton, Input::Text("abde"));
    assert_eq!(
        got,
        vec![
            ("a".into(), 0),
            ("ab".into(), 0),
            ("b".into(), 1),
            ("de".into(), 2),
        ]
    );
}

#[test]
fn scenario_3() {
    let automaton = build(&["a", "ab", "abc", "abcd"], false);
    let got = match_pairs(&automaton, Input::Text("abcd"));
    assert_eq!(
        got,
        vec![
            ("a".into(), 0),
            ("ab".into(), 0),
            ("abc".into(), 0),
            ("abcd".into(), 0),
        ]
    );
}

#[test]
fn scenario_4() {
    let automaton = build(&["d", "cd", "bcd", "abcd"], false);
    let got = match_pairs(&automaton, Input::Text("abcd"));
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

#[test]
fn scenario_5_ignore_case() {
    let automaton = build(&["a", "b", "c", "d"], true);
    let got = match_pairs(&automaton, Input::Text("AaBbCcDd"));
    assert_eq!(
        got,
        vec![
            ("a".into(), 0),
            ("a".into(), 1),
            ("b".into(), 2),
            ("b".into(), 3),
            ("c".into(), 4),
            ("c".into(), 5),
            ("d".into(), 6),
            ("d".into(), 7),
        ]
    );
}

#[test]
fn scenario_5b_byte_mode_ignore_case() {
    // §6: byte-mode ignore_case applies ASCII-only folding (0x41-0x5A <->
    // 0x61-0x7A), independent of the text-mode Unicode fold path.
    let automaton = AhoCorasickBuilder::new(true)
        .add(&b"AB"[..])
        .unwrap()
        .build();
    let hits: Vec<(String, usize)> = automaton
        .find_all(Input::Bytes(b"abABxxaB"))
        .into_iter()
        .map(|h| {
            let text = match h.keyword() {
                Keyword::Bytes(b) => String::from_utf8(b.clone()).unwrap(),
                Keyword::Text(s) => s.clone(),
            };
            (text, h.offset())
        })
        .collect();
    assert_eq!(
        hits,
        vec![("AB".into(), 0), ("AB".into(), 2), ("AB".into(), 6)]
    );
}

#[test]
fn scenario_6_byte_mode_long_input() {
    let automaton = AhoCorasickBuilder::new(false)
        .add(&b"abc"[..])
        .unwrap()
        .add(&b"abcde"[..])
        .unwrap()
        .build();

    let mut haystack = Vec::new();
    haystack.extend_from_slice(b"abc");
    for _ in 0..1000 {
        haystack.extend(std::iter::repeat(b'a').take(100));
        haystack.extend(std::iter::repeat(b'b').take(100));
    }
    haystack.extend_from_slice(b"abcde");
    let l = haystack.len();

    let hits: Vec<(String, usize)> = automaton
        .find_all(Input::Bytes(&haystack))
        .into_iter()
        .map(|h| {
            let text = match h.keyword() {
                Keyword::Bytes(b) => String::from_utf8(b.clone()).unwrap(),
                Keyword::Text(s) => s.clone(),
            };
            (text, h.offset())
        })
        .collect();

    assert_eq!(
        hits,
        vec![
            ("abc".into(), 0),
            ("abc".into(), l - 5),
            ("abcde".into(), l - 5),
        ]
    );
}

#[test]
fn scenario_7_multibyte_unicode_keyword() {
    // A single-codepoint keyword outside the Basic Latin range, encoded as
    // 3 bytes in UTF-8 (U+F8D2, private-use area), flanked by neighboring
    // private-use codepoints that must not themselves match.
    let keyword = "\u{F8D2}";
    let haystack = "\u{F8D1}\u{F8D2}\u{F8D3}";
    let automaton = build(&[keyword], false);
    let got = match_pairs(&automaton, Input::Text(haystack));
    assert_eq!(got, vec![(keyword.to_string(), 1)]);
}

#[test]
fn boundary_empty_input() {
    let automaton = build(&["a"], false);
    assert!(automaton.find_all(Input::Text("")).is_empty());
}

#[test]
fn boundary_keyword_equals_whole_input() {
    let automaton = build(&["abc"], false);
    let hits = automaton.find_all(Input::Text("abc"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].offset(), 0);
    assert_eq!(hits[0].end(), 3);
}

#[test]
fn boundary_keyword_longer_than_input() {
    let automaton = build(&["abcdef"], false);
    assert!(automaton.find_all(Input::Text("abc")).is_empty());
}
