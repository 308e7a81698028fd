/*-
 * Copyright 2003-2005 Colin Percival
 * Copyright 2012 Matthew Endsley
 * Modified 2017 Pieter-Jan Briers
 * Modified 2021 Kornel Lesinski
 * All rights reserved
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted providing that the following conditions
 * are met:
 * 1. Redistributions of source code must retain the above copyright
 *    notice, this list of conditions and the following disclaimer.
 * 2. Redistributions in binary form must reproduce the above copyright
 *    notice, this list of conditions and the following disclaimer in the
 *    documentation and/or other materials provided with the distribution.
 *
 * THIS SOFTWARE IS PROVIDED BY THE AUTHOR ``AS IS'' AND ANY EXPRESS OR
 * IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
 * WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
 * ARE DISCLAIMED.  IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
 * DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS
 * OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION)
 * HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING
 * IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
 * POSSIBILITY OF SUCH DAMAGE.
 */

//! Parses the 36-byte header, opens three independent streaming decompressors, and
//! interleaves them with windowed reads of `old` to reconstruct `new`.
//!
//! Never holds the whole of `old` or `new` in memory: `old` is read through a generic
//! `Read + Seek` source in fixed `RAM_SIZE`-byte windows, and `new` is written incrementally
//! to a `Write` sink.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use crate::codec::open_block;
use crate::error::PatchError;
use crate::varint;
use crate::writer::{HEADER_LEN, MAGIC};

/// Matches the upstream C reference's `#define RAM_SIZE 512`.
pub const RAM_SIZE: usize = 512;

/// Apply `patch_bytes` against `old`, writing the reconstructed file to `new`.
///
/// `old` only needs to support `Read + Seek`; this function never reads more than
/// `RAM_SIZE` bytes of it at a time, and positions outside `[0, oldsize)` (including
/// negative positions reachable via a backward `seek`) are treated as contributing the byte
/// `0`, matching the wire format's defined behavior rather than erroring.
pub fn patch<R: Read + Seek, W: Write>(
    mut old: R,
    patch_bytes: &[u8],
    new: &mut W,
) -> Result<(), PatchError> {
    if patch_bytes.len() < HEADER_LEN {
        return Err(PatchError::CorruptPatch("patch shorter than 36-byte header".into()));
    }
    if &patch_bytes[0..12] != MAGIC {
        return Err(PatchError::BadMagic);
    }

    let ctrl_len = varint::decode(patch_bytes[12..20].try_into().unwrap());
    let diff_len = varint::decode(patch_bytes[20..28].try_into().unwrap());
    let newsize = varint::decode(patch_bytes[28..36].try_into().unwrap());
    if ctrl_len < 0 || diff_len < 0 || newsize < 0 {
        return Err(PatchError::NegativeLength);
    }
    let ctrl_len = ctrl_len as usize;
    let diff_len = diff_len as usize;

    let ctrl_start = HEADER_LEN;
    let diff_start = ctrl_start
        .checked_add(ctrl_len)
        .ok_or_else(|| PatchError::CorruptPatch("control stream length overflows".into()))?;
    let extra_start = diff_start
        .checked_add(diff_len)
        .ok_or_else(|| PatchError::CorruptPatch("diff stream length overflows".into()))?;
    if extra_start > patch_bytes.len() {
        return Err(PatchError::CorruptPatch("control/diff streams exceed patch length".into()));
    }

    let mut ctrl_reader = open_block(&patch_bytes[ctrl_start..diff_start])?;
    let mut diff_reader = open_block(&patch_bytes[diff_start..extra_start])?;
    let mut extra_reader = open_block(&patch_bytes[extra_start..])?;

    let mut oldpos: i64 = 0;
    let mut newpos: i64 = 0;
    let mut old_buf = [0u8; RAM_SIZE];
    let mut stream_buf = [0u8; RAM_SIZE];

    while newpos < newsize {
        let mut ctrl_raw = [0u8; 24];
        ctrl_reader
            .read_exact(&mut ctrl_raw)
            .map_err(|_| PatchError::CorruptPatch("truncated control stream".into()))?;
        let dlen = varint::decode(ctrl_raw[0..8].try_into().unwrap());
        let elen = varint::decode(ctrl_raw[8..16].try_into().unwrap());
        let seek = varint::decode(ctrl_raw[16..24].try_into().unwrap());
        if dlen < 0 || elen < 0 {
            return Err(PatchError::NegativeLength);
        }
        log::trace!("patcher: ctrl dlen={dlen} elen={elen} seek={seek}");

        if newpos + dlen > newsize {
            return Err(PatchError::CorruptPatch("diff region overruns newsize".into()));
        }
        let mut remaining = dlen;
        while remaining > 0 {
            let k = remaining.min(RAM_SIZE as i64) as usize;
            let window = &mut old_buf[..k];
            window.fill(0);
            fill_old_window(&mut old, oldpos, window)?;
            diff_reader
                .read_exact(&mut stream_buf[..k])
                .map_err(|_| PatchError::CorruptPatch("truncated diff stream".into()))?;
            for i in 0..k {
                old_buf[i] = old_buf[i].wrapping_add(stream_buf[i]);
            }
            new.write_all(&old_buf[..k])?;
            oldpos += k as i64;
            newpos += k as i64;
            remaining -= k as i64;
        }

        if newpos + elen > newsize {
            return Err(PatchError::CorruptPatch("extra region overruns newsize".into()));
        }
        let mut remaining = elen;
        while remaining > 0 {
            let k = remaining.min(RAM_SIZE as i64) as usize;
            extra_reader
                .read_exact(&mut stream_buf[..k])
                .map_err(|_| PatchError::CorruptPatch("truncated extra stream".into()))?;
            new.write_all(&stream_buf[..k])?;
            newpos += k as i64;
            remaining -= k as i64;
        }

        oldpos += seek;
    }

    log::debug!("patcher: reconstructed {newpos} bytes, final oldpos={oldpos}");
    Ok(())
}

/// Convenience wrapper for callers who already hold `old` in memory: applies `patch_bytes`
/// against `old` and returns the reconstructed bytes.
pub fn patch_slice(old: &[u8], patch_bytes: &[u8]) -> Result<Vec<u8>, PatchError> {
    let mut new = Vec::new();
    patch(Cursor::new(old), patch_bytes, &mut new)?;
    Ok(new)
}

/// Fill `buf` from `old` starting at `window_start`, leaving positions outside
/// `[0, oldsize)` as `0` (the positions the caller already zeroed `buf` to).
fn fill_old_window<R: Read + Seek>(
    old: &mut R,
    window_start: i64,
    buf: &mut [u8],
) -> Result<(), PatchError> {
    if window_start >= 0 {
        old.seek(SeekFrom::Start(window_start as u64))?;
        read_best_effort(old, buf)?;
    } else {
        let negative_len = (-window_start) as usize;
        if negative_len < buf.len() {
            old.seek(SeekFrom::Start(0))?;
            read_best_effort(old, &mut buf[negative_len..])?;
        }
    }
    Ok(())
}

/// Read as many bytes as are available, leaving the unfilled tail untouched (the caller has
/// already zeroed it) rather than treating a short read as an error — EOF mid-window is how
/// an out-of-range `old` position is represented.
fn read_best_effort<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;

    fn roundtrip(old: &[u8], new: &[u8]) {
        let mut patch_bytes = Vec::new();
        diff(old, new, &mut patch_bytes).unwrap();
        let reconstructed = patch_slice(old, &patch_bytes).unwrap();
        assert_eq!(reconstructed, new);
    }

    #[test]
    fn empty_old_to_text() {
        roundtrip(b"", b"hello");
    }

    #[test]
    fn text_to_empty() {
        roundtrip(b"hello", b"");
    }

    #[test]
    fn identical_inputs() {
        roundtrip(b"abc", b"abc");
    }

    #[test]
    fn rejects_short_patch() {
        assert!(matches!(
            patch_slice(b"old", &[0u8; 10]),
            Err(PatchError::CorruptPatch(_))
        ));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = vec![0u8; 36];
        bytes[0..12].copy_from_slice(b"NOT-A-MAGIC!");
        assert!(matches!(patch_slice(b"old", &bytes), Err(PatchError::BadMagic)));
    }
}
