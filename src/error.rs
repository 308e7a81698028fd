use std::io;

/// Errors produced while applying a patch.
///
/// `diff()` never produces one of these: it can only fail via the caller's `Write`
/// (surfaced as a plain [`io::Error`]), since there is no "corrupt" state to diff into.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt patch: bad magic")]
    BadMagic,

    #[error("corrupt patch: negative length in header")]
    NegativeLength,

    #[error("corrupt patch: {0}")]
    CorruptPatch(String),
}
