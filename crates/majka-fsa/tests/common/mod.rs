// Test fixture: assembles small dictionary images from a list of paths.
//
// This is a plain trie writer (no suffix sharing), enough to exercise the
// lookup engine. Each entry is a full automaton path `surface:payload`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use majka_fsa::format::{DICT_VERSION_MAJOR, FSA_REVISION, HEADER_SIZE, MAGIC};

const FINAL: u64 = 0b001;
const LAST: u64 = 0b010;

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    is_final: bool,
}

pub struct DictionaryBuilder {
    record_type: u8,
    width: usize,
    max_results_size: u32,
    root: TrieNode,
}

impl DictionaryBuilder {
    pub fn new(record_type: u8) -> Self {
        Self {
            record_type,
            width: 3,
            max_results_size: 1024,
            root: TrieNode::default(),
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Add a path given as bytes in the internal alphabet.
    pub fn path(mut self, path: impl AsRef<[u8]>) -> Self {
        let mut node = &mut self.root;
        for &b in path.as_ref() {
            node = node.children.entry(b).or_default();
        }
        node.is_final = true;
        self
    }

    pub fn paths<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        paths.into_iter().fold(self, |b, p| b.path(p))
    }

    /// Complete dictionary file bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[..4].copy_from_slice(&MAGIC);
        data[4] = FSA_REVISION;
        data[6] = b'+';
        data[7] = self.width as u8;
        data[8] = self.record_type;
        data[9] = DICT_VERSION_MAJOR;
        data[16..20].copy_from_slice(&self.max_results_size.to_le_bytes());

        let stride = 1 + self.width;
        // root node, then the start node pointing at the root's children
        let mut body = vec![0u8; 2 * stride];
        let first = self.write_run(&self.root, &mut body);
        self.write_node(&mut body, stride, 0, first, LAST);

        data.extend_from_slice(&body);
        data
    }

    /// Write the file to a fresh path in the temp directory.
    pub fn write_temp(&self, name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("majka-{}-{name}.fsa", std::process::id()));
        write(&path, &self.build());
        path
    }

    fn write_run(&self, node: &TrieNode, body: &mut Vec<u8>) -> usize {
        let stride = 1 + self.width;
        let start = body.len();
        let count = node.children.len();
        body.resize(start + count * stride, 0);
        for (i, (&letter, child)) in node.children.iter().enumerate() {
            let target = if child.children.is_empty() {
                0
            } else {
                self.write_run(child, body)
            };
            let mut flags = 0;
            if child.is_final {
                flags |= FINAL;
            }
            if i + 1 == count {
                flags |= LAST;
            }
            self.write_node(body, start + i * stride, letter, target, flags);
        }
        start
    }

    fn write_node(&self, body: &mut [u8], pos: usize, letter: u8, target: usize, flags: u64) {
        let field = ((target as u64) << 3) | flags;
        assert!(
            self.width >= 8 || field >> (8 * self.width) == 0,
            "address does not fit in field"
        );
        body[pos] = letter;
        body[pos + 1..pos + 1 + self.width].copy_from_slice(&field.to_le_bytes()[..self.width]);
    }
}

fn write(path: &Path, data: &[u8]) {
    std::fs::write(path, data).unwrap();
}

/// Convert UTF-8 text to the internal single-byte alphabet.
pub fn internal(text: &str) -> Vec<u8> {
    let tables = majka_core::CodeTables::new();
    let mut out = Vec::new();
    majka_core::Encoding::Utf8
        .normalize_into(&tables, text.as_bytes(), usize::MAX, &mut out)
        .unwrap();
    out
}

/// Word-to-lemma-and-tag path: `surface:` + trim count + insertion + `:tag`.
pub fn analysis_path(surface: &str, lemma: &str, tag: &str) -> Vec<u8> {
    let s = internal(surface);
    let l = internal(lemma);
    let common = s.iter().zip(&l).take_while(|(a, b)| a == b).count();
    let mut path = s.clone();
    path.push(b':');
    path.push(b'A' + (s.len() - common) as u8);
    path.extend_from_slice(&l[common..]);
    path.push(b':');
    path.extend_from_slice(tag.as_bytes());
    path
}

/// The three-word dictionary used across the tests.
pub fn animals() -> DictionaryBuilder {
    DictionaryBuilder::new(1).paths([
        analysis_path("cats", "cat", "NOUN.PL"),
        analysis_path("cat", "cat", "NOUN.SG"),
        analysis_path("dog", "dog", "NOUN.SG"),
    ])
}
