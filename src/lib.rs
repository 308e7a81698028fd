#![doc = include_str!("../README.md")]

mod codec;
mod diff_engine;
mod error;
mod patcher;
mod search;
mod suffix_array;
mod varint;
mod writer;

pub use diff_engine::ControlEntry;
pub use error::PatchError;
pub use patcher::{patch, patch_slice, RAM_SIZE};
pub use suffix_array::SuffixArray;

use std::io::{self, Write};

/// Diff `old` against `new`, writing a complete patch (header + three gzip-framed
/// streams) to `writer`.
///
/// The patch can be applied against `old` with [`patch`] or [`patch_slice`] to reconstruct
/// `new`. This can only fail via the caller's `Write` impl — there is no "corrupt" state to
/// diff into.
pub fn diff<W: Write>(old: &[u8], new: &[u8], writer: &mut W) -> io::Result<()> {
    let sa = SuffixArray::build(old);
    let out = diff_engine::compute(old, new, &sa);
    self::writer::write(&out.ctrl, &out.diff, &out.extra, new.len() as i64, writer)
}
