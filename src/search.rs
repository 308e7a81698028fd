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

//! Binary search over a [`SuffixArray`] for the suffix of `old` whose prefix best matches
//! the start of a `new` slice. Not guaranteed to find the *globally* longest match anywhere
//! in `old` — it is the match closest in suffix-array order, which is what the greedy
//! [`crate::diff_engine`] scan needs.

/// Length of the longest common byte prefix of `a` and `b`.
#[inline]
pub fn matchlen(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Search `old` (indexed by `sa`) for the suffix whose prefix best matches `new_tail`.
/// Returns `(old_position, match_length)`.
pub fn search(sa: &[i64], old: &[u8], new_tail: &[u8]) -> (i64, usize) {
    if sa.len() < 3 {
        let x = matchlen(&old[sa[0] as usize..], new_tail);
        let y = matchlen(&old[sa[sa.len() - 1] as usize..], new_tail);
        if x > y {
            (sa[0], x)
        } else {
            (sa[sa.len() - 1], y)
        }
    } else {
        let mid = (sa.len() - 1) / 2;
        let candidate = &old[sa[mid] as usize..];
        let probe_len = candidate.len().min(new_tail.len());
        if candidate[..probe_len] < new_tail[..probe_len] {
            search(&sa[mid..], old, new_tail)
        } else {
            search(&sa[..=mid], old, new_tail)
        }
    }
}
