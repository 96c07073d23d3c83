//! Decoding of compiled gettext MO catalogs.
//!
//! Layout: a 28-byte header (magic, revision, entry count, originals table
//! offset, translations table offset, hash table size, hash table offset),
//! two tables of `(length, offset)` pairs, and the string blob they point
//! into. All integers share the byte order announced by the magic.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    CONTEXT_SEPARATOR, CoreError, CoreResult, PLURAL_SEPARATOR, TranslationCatalog,
    TranslationEntry,
};

pub const MO_MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 7 * 4;
const TABLE_ENTRY_LEN: usize = 2 * 4;
const MAX_MAJOR_REVISION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn detect(magic: [u8; 4]) -> CoreResult<Self> {
        if u32::from_le_bytes(magic) == MO_MAGIC {
            Ok(ByteOrder::Little)
        } else if u32::from_be_bytes(magic) == MO_MAGIC {
            Ok(ByteOrder::Big)
        } else {
            Err(CoreError::Format("magic mismatch"))
        }
    }

    fn decode(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoHeader {
    pub byte_order: ByteOrder,
    pub revision: u32,
    pub entry_count: u32,
    pub originals_offset: u32,
    pub translations_offset: u32,
    pub hash_size: u32,
    pub hash_offset: u32,
}

impl MoHeader {
    pub fn major_revision(&self) -> u32 {
        self.revision >> 16
    }

    pub fn minor_revision(&self) -> u32 {
        self.revision & 0xffff
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StringRef {
    length: u32,
    offset: u32,
}

pub fn parse_mo_header(input: &[u8]) -> CoreResult<MoHeader> {
    let magic = input
        .get(..4)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .ok_or(CoreError::Format("magic missing"))?;
    let byte_order = ByteOrder::detect(magic)?;
    if input.len() < HEADER_LEN {
        return Err(CoreError::Truncated("header too short"));
    }

    let mut cursor = 4;
    let revision = read_u32(input, &mut cursor, byte_order)?;
    if revision >> 16 > MAX_MAJOR_REVISION {
        return Err(CoreError::Format("unsupported revision"));
    }
    let entry_count = read_u32(input, &mut cursor, byte_order)?;
    let originals_offset = read_u32(input, &mut cursor, byte_order)?;
    let translations_offset = read_u32(input, &mut cursor, byte_order)?;
    let hash_size = read_u32(input, &mut cursor, byte_order)?;
    let hash_offset = read_u32(input, &mut cursor, byte_order)?;

    Ok(MoHeader {
        byte_order,
        revision,
        entry_count,
        originals_offset,
        translations_offset,
        hash_size,
        hash_offset,
    })
}

/// Parses a whole MO file. Keys repeated within the file resolve to the last
/// occurrence.
pub fn parse_mo(input: &[u8]) -> CoreResult<TranslationCatalog> {
    let header = parse_mo_header(input)?;
    let count = header.entry_count as usize;
    let originals = read_table(input, header.originals_offset, count, header.byte_order)?;
    let translations = read_table(input, header.translations_offset, count, header.byte_order)?;

    check_charset(input, &originals, &translations)?;

    let mut catalog = TranslationCatalog::new();
    for (original, translated) in originals.into_iter().zip(translations) {
        let key = read_string(input, original)?;
        let value = read_string(input, translated)?;
        if key.is_empty() {
            for (name, value) in parse_metadata(value) {
                catalog.set_header(name, value);
            }
            continue;
        }
        catalog.insert(decode_entry(key, value));
    }
    Ok(catalog)
}

/// Rejects catalogs whose metadata declares a charset other than UTF-8 before
/// any string is decoded.
fn check_charset(
    input: &[u8],
    originals: &[StringRef],
    translations: &[StringRef],
) -> CoreResult<()> {
    let Some(position) = originals.iter().position(|original| original.length == 0) else {
        return Ok(());
    };
    let Some(metadata) = translations.get(position) else {
        return Ok(());
    };
    let bytes = read_bytes(input, *metadata)?;
    let block = String::from_utf8_lossy(bytes);
    let charset = parse_metadata(&block)
        .find(|(name, _)| name.eq_ignore_ascii_case("Content-Type"))
        .and_then(|(_, value)| content_type_charset(value));
    match charset {
        Some(charset) if !is_utf8_compatible(charset) => {
            Err(CoreError::Format("unsupported charset"))
        }
        _ => Ok(()),
    }
}

fn content_type_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim())
        } else {
            None
        }
    })
}

fn is_utf8_compatible(charset: &str) -> bool {
    ["utf-8", "utf8", "us-ascii", "ascii"]
        .iter()
        .any(|known| charset.eq_ignore_ascii_case(known))
}

fn read_table(
    input: &[u8],
    offset: u32,
    count: usize,
    byte_order: ByteOrder,
) -> CoreResult<Vec<StringRef>> {
    let start = offset as usize;
    let end = count
        .checked_mul(TABLE_ENTRY_LEN)
        .and_then(|len| start.checked_add(len))
        .ok_or(CoreError::Truncated("string table out of bounds"))?;
    if end > input.len() {
        return Err(CoreError::Truncated("string table out of bounds"));
    }

    let mut cursor = start;
    let mut refs = Vec::with_capacity(count);
    for _ in 0..count {
        let length = read_u32(input, &mut cursor, byte_order)?;
        let offset = read_u32(input, &mut cursor, byte_order)?;
        refs.push(StringRef { length, offset });
    }
    Ok(refs)
}

fn read_bytes(input: &[u8], string: StringRef) -> CoreResult<&[u8]> {
    let start = string.offset as usize;
    let end = start
        .checked_add(string.length as usize)
        .ok_or(CoreError::Truncated("string out of bounds"))?;
    input
        .get(start..end)
        .ok_or(CoreError::Truncated("string out of bounds"))
}

fn read_string(input: &[u8], string: StringRef) -> CoreResult<&str> {
    let bytes = read_bytes(input, string)?;
    core::str::from_utf8(bytes).map_err(|_| CoreError::Format("string is not valid utf-8"))
}

fn decode_entry(key: &str, value: &str) -> TranslationEntry {
    let (context, key) = match key.split_once(CONTEXT_SEPARATOR) {
        Some((context, rest)) => (Some(context), rest),
        None => (None, key),
    };
    let (original, plural) = match key.split_once(PLURAL_SEPARATOR) {
        Some((singular, plural)) => (singular, Some(plural)),
        None => (key, None),
    };

    TranslationEntry {
        context: context.map(String::from),
        original: String::from(original),
        plural: plural.map(String::from),
        translations: value.split(PLURAL_SEPARATOR).map(String::from).collect(),
    }
}

fn parse_metadata(block: &str) -> impl Iterator<Item = (&str, &str)> {
    block.lines().filter_map(|line| {
        let (name, value) = line.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some((name, value.trim()))
    })
}

fn read_u32(input: &[u8], cursor: &mut usize, byte_order: ByteOrder) -> CoreResult<u32> {
    let end = *cursor + 4;
    let bytes = input
        .get(*cursor..end)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .ok_or(CoreError::Truncated("unexpected eof"))?;
    *cursor = end;
    Ok(byte_order.decode(bytes))
}
