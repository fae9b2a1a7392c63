// Criterion benchmarks for majka-fsa.
//
// Uses a generated dictionary by default. Set MAJKA_DICT to a compiled
// dictionary to benchmark against real data instead.
//
// Run:
//   cargo bench -p majka-fsa
//   MAJKA_DICT=/path/to/majka.w-lt cargo bench -p majka-fsa

use criterion::{Criterion, criterion_group, criterion_main};
use majka_fsa::{Fsa, SearchFlags};

#[path = "../tests/common/mod.rs"]
mod common;

const WORDS: &[&str] = &["pes", "psa", "kočka", "koček", "žena", "ženy", "byl", "je"];

fn load() -> Fsa {
    if let Some(path) = std::env::var_os("MAJKA_DICT") {
        return Fsa::load(&path).expect("failed to load MAJKA_DICT");
    }
    let data = common::DictionaryBuilder::new(1)
        .paths([
            common::analysis_path("pes", "pes", "k1gMnSc1"),
            common::analysis_path("psa", "pes", "k1gMnSc2"),
            common::analysis_path("kočka", "kočka", "k1gFnSc1"),
            common::analysis_path("koček", "kočka", "k1gFnPc2"),
            common::analysis_path("žena", "žena", "k1gFnSc1"),
            common::analysis_path("ženy", "žena", "k1gFnPc1"),
            common::analysis_path("byl", "být", "k5eAaImAgMnS"),
            common::analysis_path("je", "být", "k5eAaImIp3nS"),
        ])
        .build();
    Fsa::from_bytes(&data).expect("generated dictionary")
}

fn bench_exact(c: &mut Criterion) {
    let fsa = load();
    let mut out = fsa.new_arena();
    c.bench_function("find_exact", |b| {
        b.iter(|| {
            for word in WORDS {
                fsa.find(word.as_bytes(), &mut out, SearchFlags::NONE).unwrap();
            }
        })
    });
}

fn bench_diacritics(c: &mut Criterion) {
    let fsa = load();
    let mut out = fsa.new_arena();
    let plain = ["pes", "psa", "kocka", "kocek", "zena", "zeny", "byl", "je"];
    c.bench_function("find_add_diacritics", |b| {
        b.iter(|| {
            for word in plain {
                fsa.find(word.as_bytes(), &mut out, SearchFlags::ADD_DIACRITICS)
                    .unwrap();
            }
        })
    });
}

fn bench_uppercase_retry(c: &mut Criterion) {
    let fsa = load();
    let mut out = fsa.new_arena();
    c.bench_function("find_uppercase_retry", |b| {
        b.iter(|| {
            for word in ["PES", "PSA", "KOČKA", "ŽENY"] {
                fsa.find(word.as_bytes(), &mut out, SearchFlags::NONE).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_exact, bench_diacritics, bench_uppercase_retry);
criterion_main!(benches);
