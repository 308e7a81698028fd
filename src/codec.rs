//! `CompressorStream`: each logical stream in a patch (control, diff, extra) is framed
//! independently as a fixed 10-byte gzip-style header followed by a raw DEFLATE body, with
//! no CRC/ISIZE trailer (the upstream reference this format is drawn from never finished
//! that TODO, and this crate does not reconstruct it).

use std::io::{self, Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::error::PatchError;

/// `1F 8B 08 00 00 00 00 00 04 03`: magic, CM=8 (deflate), FLG=0, MTIME=0, XFL=4, OS=3.
const BLOCK_HEADER: [u8; 10] = [0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x03];

/// Gzip-frame-compress `data` into an independent, self-contained block.
pub fn compress_block(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let body = encoder.finish()?;

    let mut framed = Vec::with_capacity(BLOCK_HEADER.len() + body.len());
    framed.extend_from_slice(&BLOCK_HEADER);
    framed.extend_from_slice(&body);
    Ok(framed)
}

/// Validate the 10-byte block header and return a streaming decompressor over the
/// remainder. Only the magic and compression-method bytes are checked; FLG/MTIME/XFL/OS are
/// accepted as written by any encoder, and no trailer is ever inspected.
pub fn open_block(framed: &[u8]) -> Result<DeflateDecoder<&[u8]>, PatchError> {
    if framed.len() < BLOCK_HEADER.len() {
        return Err(PatchError::CorruptPatch("compressed block shorter than its header".into()));
    }
    if framed[0] != 0x1F || framed[1] != 0x8B {
        return Err(PatchError::CorruptPatch("bad gzip magic in compressed block".into()));
    }
    if framed[2] != 0x08 {
        return Err(PatchError::CorruptPatch("unsupported compression method in compressed block".into()));
    }
    Ok(DeflateDecoder::new(&framed[BLOCK_HEADER.len()..]))
}

/// Fully decompress a block, returning its raw bytes.
pub fn decompress_block(framed: &[u8]) -> Result<Vec<u8>, PatchError> {
    let mut decoder = open_block(framed)?;
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PatchError::CorruptPatch(format!("deflate error: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        let framed = compress_block(&data).unwrap();
        assert_eq!(&framed[..10], &BLOCK_HEADER);
        let decoded = decompress_block(&framed).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn round_trips_empty_block() {
        let framed = compress_block(&[]).unwrap();
        let decoded = decompress_block(&framed).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut framed = compress_block(b"hello").unwrap();
        framed[0] = 0;
        assert!(decompress_block(&framed).is_err());
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(decompress_block(&[0x1F, 0x8B]).is_err());
    }
}
