//! End-to-end round-trip scenarios, driven through the public `diff`/`patch_slice` API
//! exactly as an external consumer of this crate would use it.

fn roundtrip(old: &[u8], new: &[u8]) -> Vec<u8> {
    let mut patch_bytes = Vec::new();
    bsdelta::diff(old, new, &mut patch_bytes).expect("diff should not fail against a Vec sink");
    bsdelta::patch_slice(old, &patch_bytes).expect("patch should reconstruct new")
}

fn xorshift(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        })
        .collect()
}

#[test]
fn quick_brown_fox_to_cat() {
    let old = b"The quick brown fox";
    let new = b"The quick brown cat";
    assert_eq!(roundtrip(old, new), new);
}

#[test]
fn full_byte_range_reversed() {
    let old: Vec<u8> = (0..=255u8).collect();
    let new: Vec<u8> = old.iter().rev().copied().collect();
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn single_byte_flip_in_random_data() {
    let old = xorshift(0xC0FFEE, 10_000);
    let mut new = old.clone();
    new[5000] = new[5000].wrapping_add(1);
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn uniform_byte_shift() {
    let old = vec![b'A'; 1024];
    let new = vec![b'B'; 1024];

    let mut patch_bytes = Vec::new();
    bsdelta::diff(&old, &new, &mut patch_bytes).unwrap();
    let reconstructed = bsdelta::patch_slice(&old, &patch_bytes).unwrap();
    assert_eq!(reconstructed, new);
}

#[test]
fn empty_old_large_new() {
    let old: &[u8] = b"";
    let new = xorshift(1, 64 * 1024);
    assert_eq!(roundtrip(old, &new), new);
}

#[test]
fn large_old_empty_new() {
    let old = xorshift(2, 64 * 1024);
    let new: &[u8] = b"";
    let mut patch_bytes = Vec::new();
    bsdelta::diff(&old, new, &mut patch_bytes).unwrap();
    let reconstructed = bsdelta::patch_slice(&old, &patch_bytes).unwrap();
    assert!(reconstructed.is_empty());
    assert!(patch_bytes.len() >= 36);
}

#[test]
fn identity_diff_has_all_zero_diff_bytes_and_round_trips() {
    let data = xorshift(3, 4096);
    assert_eq!(roundtrip(&data, &data), data);
}

#[test]
fn both_empty() {
    assert_eq!(roundtrip(b"", b""), b"");
}

#[test]
fn patch_shorter_than_header_is_rejected() {
    let err = bsdelta::patch_slice(b"old", &[0u8; 10]).unwrap_err();
    assert!(matches!(err, bsdelta::PatchError::CorruptPatch(_)));
}

#[test]
fn bad_magic_is_rejected() {
    let mut header = vec![0u8; 36];
    header[0..12].copy_from_slice(b"NOT-A-MAGIC!");
    let err = bsdelta::patch_slice(b"old", &header).unwrap_err();
    assert!(matches!(err, bsdelta::PatchError::BadMagic));
}

#[test]
fn negative_seek_references_are_legal() {
    // Construct data where the best match for a later region lies behind an earlier one,
    // forcing the differ to emit a control record with a negative `seek`.
    let old = b"abcXYZdefabc".to_vec();
    let new = b"abcdefabc".to_vec();
    assert_eq!(roundtrip(&old, &new), new);
}
