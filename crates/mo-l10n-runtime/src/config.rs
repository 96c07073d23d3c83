use std::fs;
use std::path::Path;

use mo_l10n_core::AvailableLocales;
use serde::Deserialize;

use crate::error::RuntimeResult;

const DEFAULT_FOLDER: &str = "languages";
const DEFAULT_PAGEINFO_FIELD: &str = "title";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct L10nConfig {
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub available: LocaleList,
    pub default: String,
    pub folder: String,
    pub pageinfo: Vec<String>,
}

/// `available` may be written as an array or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocaleList {
    List(Vec<String>),
    Csv(String),
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            available: LocaleList::List(vec!["en".to_string()]),
            default: "en".to_string(),
            folder: DEFAULT_FOLDER.to_string(),
            pageinfo: vec![DEFAULT_PAGEINFO_FIELD.to_string()],
        }
    }
}

impl LocaleConfig {
    /// Catalog folder under the content root; blank falls back to `languages`.
    pub fn folder(&self) -> &str {
        let folder = self.folder.trim();
        if folder.is_empty() { DEFAULT_FOLDER } else { folder }
    }

    /// Page-info fields to translate; an empty list means `["title"]`.
    pub fn pageinfo_fields(&self) -> Vec<String> {
        if self.pageinfo.is_empty() {
            vec![DEFAULT_PAGEINFO_FIELD.to_string()]
        } else {
            self.pageinfo.clone()
        }
    }
}

impl LocaleList {
    pub fn to_available(&self) -> AvailableLocales {
        match self {
            LocaleList::List(locales) => AvailableLocales::from_list(locales),
            LocaleList::Csv(list) => AvailableLocales::parse(list),
        }
    }
}

impl L10nConfig {
    pub fn from_toml_str(contents: &str) -> RuntimeResult<Self> {
        Ok(toml::from_str(contents)?)
    }
}

pub fn load_config(path: &Path) -> RuntimeResult<L10nConfig> {
    let contents = fs::read_to_string(path)?;
    L10nConfig::from_toml_str(&contents)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<L10nConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(L10nConfig::default())
    }
}
