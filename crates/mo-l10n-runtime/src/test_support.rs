const MO_MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: u32 = 28;

/// Little-endian MO bytes for `(key, translation)` pairs, keys written as-is.
pub(crate) fn build_mo(entries: &[(&str, &str)]) -> Vec<u8> {
    let count = entries.len() as u32;
    let originals_offset = HEADER_LEN;
    let translations_offset = originals_offset + count * 8;
    let mut blob_offset = translations_offset + count * 8;

    let mut bytes = Vec::new();
    for value in [MO_MAGIC, 0, count, originals_offset, translations_offset, 0, blob_offset] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }

    let strings = entries
        .iter()
        .map(|(key, _)| *key)
        .chain(entries.iter().map(|(_, value)| *value));
    let mut blob = Vec::new();
    for string in strings {
        bytes.extend_from_slice(&(string.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&blob_offset.to_le_bytes());
        blob.extend_from_slice(string.as_bytes());
        blob.push(0);
        blob_offset += string.len() as u32 + 1;
    }
    bytes.extend_from_slice(&blob);
    bytes
}
