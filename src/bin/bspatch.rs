//! `bspatch <oldfile> <patchfile> <newfile>`: apply a patch produced by `bsdiff`.
//! No flags, no environment variables.

use std::env;
use std::fs;
use std::io::BufWriter;
use std::process::ExitCode;

use bsdelta::PatchError;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <oldfile> <patchfile> <newfile>", args.first().map(String::as_str).unwrap_or("bspatch"));
        return ExitCode::from(1);
    }

    let old_file = match fs::File::open(&args[1]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bspatch: {}: {e}", args[1]);
            return ExitCode::from(2);
        }
    };
    let patch_bytes = match fs::read(&args[2]) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("bspatch: {}: {e}", args[2]);
            return ExitCode::from(2);
        }
    };

    let new_file = match fs::File::create(&args[3]) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bspatch: {}: {e}", args[3]);
            return ExitCode::from(2);
        }
    };
    let mut out = BufWriter::new(new_file);

    if let Err(e) = bsdelta::patch(old_file, &patch_bytes, &mut out) {
        return match e {
            PatchError::Io(io_err) => {
                eprintln!("bspatch: {io_err}");
                ExitCode::from(2)
            }
            other => {
                eprintln!("bspatch: corrupt patch: {other}");
                ExitCode::from(3)
            }
        };
    }

    ExitCode::SUCCESS
}
