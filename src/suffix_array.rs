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

//! Suffix array construction over the *old* byte sequence via `qsufsort`
//! (Larsson-Sadakane prefix doubling).

use std::cmp::Ordering;

#[inline(always)]
fn usz(i: i64) -> usize {
    debug_assert!(i >= 0);
    i as usize
}

/// `I[0..=oldsize]`: `I[k]` is the start position in `old` of the `k`-th suffix in
/// lexicographic order (the empty suffix at position `oldsize` included).
pub struct SuffixArray {
    entries: Vec<i64>,
}

impl SuffixArray {
    /// Build the suffix array of `old`. `O(oldsize * log^2 oldsize)` time, `O(oldsize)`
    /// auxiliary space (the working vector `V` is dropped before this function returns).
    pub fn build(old: &[u8]) -> Self {
        let n = old.len();
        let mut i = vec![0i64; n + 1];
        let mut v = vec![0i64; n + 1];
        qsufsort(&mut i, &mut v, old);
        log::debug!("suffix_array: built over {n} bytes");
        SuffixArray { entries: i }
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.entries
    }
}

struct SplitParams {
    start: usize,
    len: usize,
}

/// Three-way quicksort-style partition of `I[start..start+len]` by the rank of each
/// suffix `h` bytes further along (`V[I[k] + h]`). Falls back to selection sort below 16
/// elements. Returns the right partition for the caller to iterate on (tail-call
/// elimination), rather than recursing into it directly.
fn split_internal(i_arr: &mut [i64], v: &mut [i64], start: usize, len: usize, h: i64) -> Option<SplitParams> {
    if len < 16 {
        let mut k = start;
        while k < start + len {
            let mut j = 1;
            let mut x = v[usz(i_arr[k] + h)];
            let mut step = 1;
            while k + step < start + len {
                let candidate = v[usz(i_arr[k + step] + h)];
                if candidate < x {
                    x = candidate;
                    j = 0;
                }
                if candidate == x {
                    i_arr.swap(k + j, k + step);
                    j += 1;
                }
                step += 1;
            }
            let kj = (k + j) as i64;
            for &entry in &i_arr[k..k + j] {
                v[usz(entry)] = kj - 1;
            }
            if j == 1 {
                i_arr[k] = -1;
            }
            k += j;
        }
        None
    } else {
        let pivot = v[usz(i_arr[start + len / 2] + h)];

        let mut less = 0;
        let mut equal = 0;
        for &entry in &i_arr[start..start + len] {
            let rank = v[usz(entry + h)];
            if rank < pivot {
                less += 1;
            }
            if rank == pivot {
                equal += 1;
            }
        }
        let less_end = less + start;
        let equal_end = equal + less_end;

        let mut j = 0;
        let mut k = 0;
        let mut idx = start;
        while idx < less_end {
            match v[usz(i_arr[idx] + h)].cmp(&pivot) {
                Ordering::Less => idx += 1,
                Ordering::Equal => {
                    i_arr.swap(idx, less_end + j);
                    j += 1;
                }
                Ordering::Greater => {
                    i_arr.swap(idx, equal_end + k);
                    k += 1;
                }
            }
        }
        while less_end + j < equal_end {
            if v[usz(i_arr[less_end + j] + h)] == pivot {
                j += 1;
            } else {
                i_arr.swap(less_end + j, equal_end + k);
                k += 1;
            }
        }

        if less_end > start {
            split(i_arr, v, start, less_end - start, h);
        }

        let equal_rank = (equal_end - 1) as i64;
        for &entry in &i_arr[less_end..equal_end] {
            v[usz(entry)] = equal_rank;
        }
        if less_end == equal_end - 1 {
            i_arr[less_end] = -1;
        }

        if start + len > equal_end {
            Some(SplitParams {
                start: equal_end,
                len: start + len - equal_end,
            })
        } else {
            None
        }
    }
}

fn split(i_arr: &mut [i64], v: &mut [i64], start: usize, len: usize, h: i64) {
    let mut pending = Some(SplitParams { start, len });
    while let Some(params) = pending {
        pending = split_internal(i_arr, v, params.start, params.len, h);
    }
}

fn qsufsort(i_arr: &mut [i64], v: &mut [i64], old: &[u8]) {
    let n = old.len() as i64;

    let mut buckets = [0i64; 256];
    for &b in old {
        buckets[b as usize] += 1;
    }
    for k in 1..256 {
        buckets[k] += buckets[k - 1];
    }
    for k in (1..256).rev() {
        buckets[k] = buckets[k - 1];
    }
    buckets[0] = 0;

    for (pos, &b) in old.iter().enumerate() {
        buckets[b as usize] += 1;
        i_arr[usz(buckets[b as usize])] = pos as i64;
    }
    i_arr[0] = n;

    for (pos, &b) in old.iter().enumerate() {
        v[pos] = buckets[b as usize];
    }
    v[usz(n)] = 0;

    for k in 1..256 {
        if buckets[k] == buckets[k - 1] + 1 {
            i_arr[usz(buckets[k])] = -1;
        }
    }
    i_arr[0] = -1;

    let mut h: i64 = 1;
    let mut passes = 0u32;
    while i_arr[0] != -(n + 1) {
        let mut len = 0i64;
        let mut idx = 0i64;
        while idx < n + 1 {
            if i_arr[usz(idx)] < 0 {
                len -= i_arr[usz(idx)];
                idx -= i_arr[usz(idx)];
            } else {
                if len != 0 {
                    i_arr[usz(idx - len)] = -len;
                }
                len = v[usz(i_arr[usz(idx)])] + 1 - idx;
                split(i_arr, v, usz(idx), usz(len), h);
                idx += len;
                len = 0;
            }
        }
        if len != 0 {
            i_arr[usz(idx - len)] = -len;
        }
        h += h;
        passes += 1;
    }
    log::debug!("suffix_array: {passes} doubling passes");

    for pos in 0..=usz(n) {
        i_arr[usz(v[pos])] = pos as i64;
    }
}
