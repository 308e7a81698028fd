/*-
 * Copyright 2003-2005 Colin Percival
 * Copyright 2012 Matthew Endsley
 * Modified 2017 Pieter-Jan Briers
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

//! Greedy scan-and-extend loop that partitions `new` into approximate-match regions
//! against `old`, producing control triples plus the diff/extra byte streams.

use crate::search::search;
use crate::suffix_array::SuffixArray;

/// One control triple: `dlen` bytes to diff against `old`, `elen` bytes to copy literally,
/// then seek `seek` bytes (signed) forward in `old`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEntry {
    pub dlen: i64,
    pub elen: i64,
    pub seek: i64,
}

pub struct DiffOutput {
    pub ctrl: Vec<ControlEntry>,
    pub diff: Vec<u8>,
    pub extra: Vec<u8>,
}

/// Run the scan loop and return the control/diff/extra triple.
pub fn compute(old: &[u8], new: &[u8], sa: &SuffixArray) -> DiffOutput {
    let sa = sa.as_slice();
    let mut ctrl = Vec::new();
    let mut diff = Vec::new();
    let mut extra = Vec::new();

    let mut scan: usize = 0;
    let mut len: usize = 0;
    let mut pos: usize = 0;
    let mut lastscan: usize = 0;
    let mut lastpos: usize = 0;
    let mut lastoffset: i64 = 0;

    while scan < new.len() {
        let mut oldscore: i64 = 0;
        scan += len;
        let mut scsc = scan;

        while scan < new.len() {
            let (p, l) = search(sa, old, &new[scan..]);
            pos = p as usize;
            len = l;

            while scsc < scan + len {
                let old_idx = scsc as i64 + lastoffset;
                if old_idx >= 0 && (old_idx as usize) < old.len() && old[old_idx as usize] == new[scsc] {
                    oldscore += 1;
                }
                scsc += 1;
            }

            if (len as i64 == oldscore && len != 0) || len as i64 > oldscore + 8 {
                break;
            }

            let old_idx = scan as i64 + lastoffset;
            if old_idx >= 0 && (old_idx as usize) < old.len() && old[old_idx as usize] == new[scan] {
                oldscore -= 1;
            }
            scan += 1;
        }

        if len as i64 == oldscore && scan != new.len() {
            continue;
        }

        // Forward extension from (lastscan, lastpos).
        let mut s: i64 = 0;
        let mut sf: i64 = 0;
        let mut lenf: usize = 0;
        {
            let mut i = 0usize;
            while lastscan + i < scan && lastpos + i < old.len() {
                if old[lastpos + i] == new[lastscan + i] {
                    s += 1;
                }
                i += 1;
                if s * 2 - i as i64 > sf * 2 - lenf as i64 {
                    sf = s;
                    lenf = i;
                }
            }
        }

        // Backward extension from (scan, pos).
        let mut lenb: usize = 0;
        if scan < new.len() {
            let mut s: i64 = 0;
            let mut sb: i64 = 0;
            let mut i = 1usize;
            while scan >= lastscan + i && pos >= i {
                if old[pos - i] == new[scan - i] {
                    s += 1;
                }
                if s * 2 - i as i64 > sb * 2 - lenb as i64 {
                    sb = s;
                    lenb = i;
                }
                i += 1;
            }
        }

        // Overlap resolution between the forward and backward extensions.
        if lastscan + lenf > scan - lenb {
            let overlap = lastscan + lenf - (scan - lenb);
            let mut s: i64 = 0;
            let mut ss: i64 = 0;
            let mut lens: usize = 0;
            for i in 0..overlap {
                if new[lastscan + lenf - overlap + i] == old[lastpos + lenf - overlap + i] {
                    s += 1;
                }
                if new[scan - lenb + i] == old[pos - lenb + i] {
                    s -= 1;
                }
                if s > ss {
                    ss = s;
                    lens = i + 1;
                }
            }
            lenf = lenf + lens - overlap;
            lenb -= lens;
        }

        diff.extend(
            new[lastscan..lastscan + lenf]
                .iter()
                .zip(&old[lastpos..lastpos + lenf])
                .map(|(n, o)| n.wrapping_sub(*o)),
        );

        let extra_start = lastscan + lenf;
        let extra_len = (scan - lenb) - (lastscan + lenf);
        extra.extend_from_slice(&new[extra_start..extra_start + extra_len]);

        ctrl.push(ControlEntry {
            dlen: lenf as i64,
            elen: extra_len as i64,
            seek: pos as i64 - lenb as i64 - (lastpos as i64 + lenf as i64),
        });

        lastscan = scan - lenb;
        lastpos = pos - lenb;
        lastoffset = pos as i64 - scan as i64;
    }

    log::debug!(
        "diff_engine: {} control entries, {} diff bytes, {} extra bytes",
        ctrl.len(),
        diff.len(),
        extra.len()
    );

    DiffOutput { ctrl, diff, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(old: &[u8], new: &[u8]) -> DiffOutput {
        let sa = SuffixArray::build(old);
        compute(old, new, &sa)
    }

    #[test]
    fn identity_diff_is_all_zero() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let out = run(data, data);
        assert!(out.diff.iter().all(|&b| b == 0));
        assert!(out.extra.is_empty());
    }

    #[test]
    fn empty_old_is_all_extra() {
        let new = b"hello";
        let out = run(b"", new);
        assert_eq!(out.ctrl.len(), 1);
        assert_eq!(out.ctrl[0], ControlEntry { dlen: 0, elen: 5, seek: 0 });
        assert_eq!(out.extra, new);
    }

    #[test]
    fn empty_new_has_no_control_entries() {
        let out = run(b"hello", b"");
        assert!(out.ctrl.is_empty());
        assert!(out.diff.is_empty());
        assert!(out.extra.is_empty());
    }

    #[test]
    fn equal_short_strings_are_pure_diff() {
        let out = run(b"abc", b"abc");
        assert_eq!(out.ctrl.len(), 1);
        assert_eq!(out.ctrl[0], ControlEntry { dlen: 3, elen: 0, seek: 0 });
        assert_eq!(out.diff, vec![0, 0, 0]);
    }

    #[test]
    fn single_byte_flip_is_isolated() {
        // Deterministic pseudo-random bytes (xorshift) rather than a periodic pattern, so the
        // suffix-array search cannot find a spurious alternate alignment elsewhere in `old`.
        let mut state: u32 = 0x9E3779B9;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        };
        let old: Vec<u8> = (0..10_000).map(|_| next()).collect();
        let mut new = old.clone();
        new[5000] = new[5000].wrapping_add(1);
        let out = run(&old, &new);
        let nonzero: Vec<_> = out.diff.iter().enumerate().filter(|(_, &b)| b != 0).collect();
        assert_eq!(nonzero.len(), 1);
    }

    #[test]
    fn uniform_byte_shift_produces_uniform_diff() {
        let old = vec![b'A'; 1024];
        let new = vec![b'B'; 1024];
        let out = run(&old, &new);
        assert_eq!(out.diff, vec![1u8; 1024]);
        assert!(out.extra.is_empty());
    }
}
