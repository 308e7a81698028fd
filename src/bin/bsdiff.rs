//! `bsdiff <oldfile> <newfile> <patchfile>`: write a patch describing how to turn
//! `oldfile` into `newfile`. No flags, no environment variables.

use std::env;
use std::fs;
use std::io::BufWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <oldfile> <newfile> <patchfile>", args.first().map(String::as_str).unwrap_or("bsdiff"));
        return ExitCode::from(1);
    }

    let old = match fs::read(&args[1]) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("bsdiff: {}: {e}", args[1]);
            return ExitCode::from(2);
        }
    };
    let new = match fs::read(&args[2]) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("bsdiff: {}: {e}", args[2]);
            return ExitCode::from(2);
        }
    };

    let out_file = match fs::File::create(&args[3]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bsdiff: {}: {e}", args[3]);
            return ExitCode::from(2);
        }
    };
    let mut out = BufWriter::new(out_file);

    if let Err(e) = bsdelta::diff(&old, &new, &mut out) {
        eprintln!("bsdiff: {}: {e}", args[3]);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
