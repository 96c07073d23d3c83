use std::fs;
use std::path::Path;

use mo_l10n_core::{TranslationCatalog, parse_mo};

use crate::error::{RuntimeError, RuntimeResult};
use crate::pageinfo::PageInfo;

/// Reads and parses one MO file. The file is read in full and closed before
/// parsing starts.
pub fn read_catalog(path: &Path) -> RuntimeResult<TranslationCatalog> {
    let bytes = fs::read(path).map_err(|source| RuntimeError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_mo(&bytes)?)
}

pub fn load_pageinfo(path: &Path) -> RuntimeResult<PageInfo> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
