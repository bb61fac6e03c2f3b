//! Command-line driver for the text adapter: processes a command file
//! (or stdin) through a fresh engine and writes results to stdout.

use gateway::CsvSession;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut session = CsvSession::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match std::env::args().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => session.process_stream(BufReader::new(file), &mut out),
            Err(err) => {
                eprintln!("error: cannot open file '{}': {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let stdin = io::stdin();
            session.process_stream(stdin.lock(), &mut out)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
