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

//! Sign-magnitude little-endian 8-byte encoding of signed 63-bit offsets.
//!
//! This is *not* two's complement: the magnitude occupies bytes 0..7 little-endian, and bit 7
//! of byte 7 carries the sign. `-0` is representable on the wire but always decodes to `0`.

/// Encode `x` into `buf` using bspatch's sign-magnitude convention.
#[inline]
pub fn encode(x: i64, buf: &mut [u8; 8]) {
    let magnitude = x.unsigned_abs();
    *buf = magnitude.to_le_bytes();
    if x < 0 {
        buf[7] |= 0x80;
    }
}

/// Decode a sign-magnitude 8-byte buffer back into `i64`.
#[inline]
pub fn decode(buf: &[u8; 8]) -> i64 {
    let mut magnitude = u64::from_le_bytes(*buf);
    let negative = magnitude & (1 << 63) != 0;
    magnitude &= !(1u64 << 63);
    if negative && magnitude != 0 {
        -(magnitude as i64)
    } else {
        magnitude as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_clear_sign_bit() {
        let mut buf = [0u8; 8];
        encode(0, &mut buf);
        assert_eq!(buf, [0u8; 8]);
        assert_eq!(decode(&buf), 0);
    }

    #[test]
    fn negative_zero_decodes_to_zero() {
        let buf = [0, 0, 0, 0, 0, 0, 0, 0x80];
        assert_eq!(decode(&buf), 0);
    }

    #[test]
    fn positive_round_trip() {
        let mut buf = [0u8; 8];
        encode(42, &mut buf);
        assert_eq!(buf, [42, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode(&buf), 42);
    }

    #[test]
    fn negative_round_trip() {
        let mut buf = [0u8; 8];
        encode(-42, &mut buf);
        assert_eq!(buf, [42, 0, 0, 0, 0, 0, 0, 0x80]);
        assert_eq!(decode(&buf), -42);
    }

    #[test]
    fn max_magnitude_round_trip() {
        let x = (1i64 << 62) - 1;
        let mut buf = [0u8; 8];
        encode(x, &mut buf);
        assert_eq!(decode(&buf), x);
        encode(-x, &mut buf);
        assert_eq!(decode(&buf), -x);
    }

    proptest::proptest! {
        #[test]
        fn round_trips_over_wide_range(x in -(1i64 << 40)..=(1i64 << 40)) {
            let mut buf = [0u8; 8];
            encode(x, &mut buf);
            proptest::prop_assert_eq!(decode(&buf), x);
        }
    }
}
