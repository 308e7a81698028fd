//! Assembles a complete patch: 36-byte header followed by three independently
//! gzip-framed streams (control, diff, extra).

use std::io::{self, Write};

use crate::codec::compress_block;
use crate::diff_engine::ControlEntry;
use crate::varint;

pub const MAGIC: &[u8; 12] = b"JWE/BSDIFF40";
pub const HEADER_LEN: usize = 36;

fn serialize_ctrl(ctrl: &[ControlEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ctrl.len() * 24);
    for entry in ctrl {
        let mut buf = [0u8; 8];
        varint::encode(entry.dlen, &mut buf);
        out.extend_from_slice(&buf);
        varint::encode(entry.elen, &mut buf);
        out.extend_from_slice(&buf);
        varint::encode(entry.seek, &mut buf);
        out.extend_from_slice(&buf);
    }
    out
}

/// Compress and write `ctrl`/`diff`/`extra` as a complete patch, preceded by the 36-byte
/// header. All three compressed lengths are known before any byte is written, so (unlike a
/// streaming-to-disk writer) there is no placeholder-then-rewrite step.
pub fn write<W: Write>(
    ctrl: &[ControlEntry],
    diff: &[u8],
    extra: &[u8],
    newsize: i64,
    out: &mut W,
) -> io::Result<()> {
    let ctrl_raw = serialize_ctrl(ctrl);
    let ctrl_compressed = compress_block(&ctrl_raw)?;
    let diff_compressed = compress_block(diff)?;
    let extra_compressed = compress_block(extra)?;

    let mut header = [0u8; HEADER_LEN];
    header[0..12].copy_from_slice(MAGIC);
    let mut buf = [0u8; 8];
    varint::encode(ctrl_compressed.len() as i64, &mut buf);
    header[12..20].copy_from_slice(&buf);
    varint::encode(diff_compressed.len() as i64, &mut buf);
    header[20..28].copy_from_slice(&buf);
    varint::encode(newsize, &mut buf);
    header[28..36].copy_from_slice(&buf);

    out.write_all(&header)?;
    out.write_all(&ctrl_compressed)?;
    out.write_all(&diff_compressed)?;
    out.write_all(&extra_compressed)?;

    log::debug!(
        "writer: wrote patch, ctrl={} diff={} extra={} newsize={}",
        ctrl_compressed.len(),
        diff_compressed.len(),
        extra_compressed.len(),
        newsize
    );
    Ok(())
}
