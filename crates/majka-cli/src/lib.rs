// majka-cli: shared utilities for the command-line tool.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use log::error;
use majka_fsa::{Fsa, FsaError, SearchFlags};

/// Dictionary file name looked up in search directories.
pub const DICT_FILE: &str = "majka.w-lt";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// `-f FILE`
    pub dict_file: Option<PathBuf>,
    /// `-p`: echo each input word and print its results on the same line.
    pub print: bool,
    pub flags: SearchFlags,
    pub help: bool,
    /// Words given as arguments instead of stdin.
    pub words: Vec<String>,
}

/// Parse command-line arguments (without the program name).
///
/// Unknown options are an error; anything not starting with `-` is a word.
pub fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-f" => {
                let file = iter.next().ok_or("-f requires a value")?;
                options.dict_file = Some(PathBuf::from(file));
            }
            "-p" => options.print = true,
            "-d" => options.flags |= SearchFlags::ADD_DIACRITICS,
            "-i" => options.flags |= SearchFlags::IGNORE_CASE,
            "-l" => options.flags |= SearchFlags::DISALLOW_LOWERCASE,
            "-h" | "--help" => options.help = true,
            a if a.starts_with('-') && a.len() > 1 => {
                return Err(format!("unknown option {a}"));
            }
            word => options.words.push(word.to_string()),
        }
    }
    Ok(options)
}

/// Locate and load the dictionary.
///
/// Search order:
/// 1. `-f` argument (if provided)
/// 2. `MAJKA_DICT` environment variable (path to the file)
/// 3. `MAJKA_DICT_PATH` environment variable (directory containing `majka.w-lt`)
/// 4. Current working directory
pub fn load_dictionary(dict_file: Option<&PathBuf>) -> Result<Fsa, String> {
    let path = match dict_file {
        Some(p) => p.clone(),
        None => {
            let candidates = search_paths();
            candidates
                .iter()
                .find(|p| p.is_file())
                .cloned()
                .ok_or_else(|| {
                    format!(
                        "could not find a dictionary (use -f FILE); searched:\n{}",
                        candidates
                            .iter()
                            .map(|p| format!("  - {}", p.display()))
                            .collect::<Vec<_>>()
                            .join("\n")
                    )
                })?
        }
    };
    Fsa::load(&path).map_err(|e| e.to_string())
}

/// Candidate dictionary files, in search order, when `-f` is not given.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(file) = std::env::var_os("MAJKA_DICT") {
        paths.push(PathBuf::from(file));
    }

    if let Some(dir) = std::env::var_os("MAJKA_DICT_PATH") {
        paths.push(PathBuf::from(dir).join(DICT_FILE));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(DICT_FILE));
    }

    paths
}

/// Write results for one word.
///
/// Echo mode prints `word:result1:result2` on one line; otherwise each
/// result goes on its own line and a word without results prints nothing.
pub fn write_results<'a, W: std::io::Write>(
    out: &mut W,
    word: &[u8],
    results: impl Iterator<Item = &'a [u8]>,
    print: bool,
) -> std::io::Result<()> {
    if print {
        out.write_all(word)?;
        for r in results {
            out.write_all(b":")?;
            out.write_all(r)?;
        }
        out.write_all(b"\n")
    } else {
        for r in results {
            out.write_all(r)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Why a run over the input words stopped early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Lookup(#[from] FsaError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Analyze the argument words, or every line of `input` when there are none,
/// writing results to `out`.
///
/// Lines longer than the maximum word length are skipped, or echoed
/// unchanged in `-p` mode. When a lookup fails, results already produced for
/// earlier words are flushed before the error is returned.
pub fn run<R: BufRead, W: Write>(
    fsa: &Fsa,
    options: &Options,
    mut input: R,
    out: &mut W,
) -> Result<(), RunError> {
    let max_len = fsa.options().max_word_length;
    let mut results = fsa.new_arena();

    let mut analyze = |word: &[u8], out: &mut W| -> Result<(), RunError> {
        if word.len() > max_len {
            if options.print {
                out.write_all(word)?;
                out.write_all(b"\n")?;
            }
            return Ok(());
        }
        if let Err(e) = fsa.find(word, &mut results, options.flags) {
            out.flush()?;
            return Err(e.into());
        }
        write_results(out, word, results.iter().map(|r| r.as_bytes()), options.print)?;
        Ok(())
    };

    if !options.words.is_empty() {
        for word in &options.words {
            analyze(word.as_bytes(), out)?;
        }
    } else {
        let mut line = Vec::new();
        loop {
            line.clear();
            match input.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    error!("error reading input: {e}");
                    break;
                }
            }
            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            analyze(&line, out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
