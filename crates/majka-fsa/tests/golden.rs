//! Golden cases: a small Czech word list and expected lookup results.
//!
//! The dictionary is generated from `tests/data/golden.json`; each case
//! lists the exact records (in order) a query must produce.
//!
//! Run: cargo test -p majka-fsa --test golden

mod common;

use std::path::PathBuf;

use common::{DictionaryBuilder, analysis_path};
use majka_fsa::{Fsa, SearchFlags};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Golden {
    record_type: u8,
    entries: Vec<Entry>,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    surface: String,
    lemma: String,
    tag: String,
}

#[derive(Debug, Deserialize)]
struct Case {
    word: String,
    flags: u8,
    expected: Vec<String>,
}

fn load_golden() -> Golden {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/golden.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

#[test]
fn golden_cases() {
    let golden = load_golden();
    let data = DictionaryBuilder::new(golden.record_type)
        .paths(
            golden
                .entries
                .iter()
                .map(|e| analysis_path(&e.surface, &e.lemma, &e.tag)),
        )
        .build();
    let fsa = Fsa::from_bytes(&data).unwrap();
    let mut out = fsa.new_arena();

    let mut failures = Vec::new();
    for case in &golden.cases {
        let flags = SearchFlags::from_bits_truncate(case.flags);
        let n = fsa.find(case.word.as_bytes(), &mut out, flags).unwrap();
        let got: Vec<String> = out.iter().map(|r| r.to_string()).collect();
        assert_eq!(n, got.len());
        if got != case.expected {
            failures.push(format!(
                "{:?} (flags {}): expected {:?}, got {:?}",
                case.word, case.flags, case.expected, got
            ));
        }
    }
    assert!(
        failures.is_empty(),
        "{} of {} golden cases failed:\n{}",
        failures.len(),
        golden.cases.len(),
        failures.join("\n")
    );
}

#[test]
fn golden_entries_round_trip() {
    let golden = load_golden();
    let fsa = Fsa::from_bytes(
        &DictionaryBuilder::new(golden.record_type)
            .paths(
                golden
                    .entries
                    .iter()
                    .map(|e| analysis_path(&e.surface, &e.lemma, &e.tag)),
            )
            .build(),
    )
    .unwrap();
    for entry in &golden.entries {
        let found = fsa.lookup(&entry.surface, SearchFlags::NONE).unwrap();
        assert!(
            found
                .iter()
                .any(|a| a.lemma == entry.lemma && a.tag.as_deref() == Some(entry.tag.as_str())),
            "{}: missing {}:{} in {:?}",
            entry.surface,
            entry.lemma,
            entry.tag,
            found
        );
    }
}
