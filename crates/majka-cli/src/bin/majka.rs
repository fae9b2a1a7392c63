// majka: morphological lookup of words from stdin.
//
// Reads words from stdin (one per line) and prints one `LEMMA:TAG` record
// per analysis. Lines longer than the maximum word length are skipped
// (echoed unchanged in -p mode).
//
// Usage:
//   majka [-f FILE] [-p] [-d] [-i] [-l] [WORD...]
//
// Options:
//   -f FILE   Dictionary file (default: $MAJKA_DICT, $MAJKA_DICT_PATH/majka.w-lt, ./majka.w-lt)
//   -p        Copy each input word to the output and print its results on one line
//   -d        Add diacritics
//   -i        Ignore case
//   -l        Do not lowercase
//   -h        Print help

use std::io;

use log::debug;
use majka_cli::RunError;

fn print_help() {
    println!("majka: morphological analysis using a majka dictionary.");
    println!();
    println!("Usage: majka [-f FILE] [-p] [-d] [-i] [-l] [WORD...]");
    println!();
    println!("If WORD arguments are given, analyzes each word.");
    println!("Otherwise reads words from stdin (one per line).");
    println!();
    println!("Options:");
    println!("  -f FILE  dictionary file");
    println!("  -p       copy the input word to the output and output the results as one line");
    println!("  -d       add diacritics");
    println!("  -i       ignore case (analyze john as John; Dog/DOG is always analyzed as dog unless -l)");
    println!("  -l       do NOT lowercase (analyze JOHN as John or Dog/DOG as dog)");
    println!("  -h       help");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = majka_cli::parse_args(&args).unwrap_or_else(|e| majka_cli::fatal(&e));
    if options.help {
        print_help();
        return;
    }

    let fsa = majka_cli::load_dictionary(options.dict_file.as_ref())
        .unwrap_or_else(|e| majka_cli::fatal(&e));
    debug!("{fsa:?}, flags {:?}", options.flags);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match majka_cli::run(&fsa, &options, io::stdin().lock(), &mut out) {
        Ok(()) => {}
        Err(RunError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => majka_cli::fatal(&e.to_string()),
    }
}
