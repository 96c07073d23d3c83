use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::{EntryKey, TranslationEntry};

/// Lookup surface shared by every catalog variant. Lookups never fail: a
/// missing key yields the caller's text unchanged.
pub trait Translations {
    fn translate<'a>(&'a self, text: &'a str, context: Option<&str>) -> &'a str;

    /// `index` is the plural form picked by the caller; it is not computed here.
    fn translate_plural<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        index: usize,
        context: Option<&str>,
    ) -> &'a str;
}

fn untranslated<'a>(singular: &'a str, plural: &'a str, index: usize) -> &'a str {
    if index == 0 { singular } else { plural }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopTranslations;

impl Translations for NoopTranslations {
    fn translate<'a>(&'a self, text: &'a str, _context: Option<&str>) -> &'a str {
        text
    }

    fn translate_plural<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        index: usize,
        _context: Option<&str>,
    ) -> &'a str {
        untranslated(singular, plural, index)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    entries: BTreeMap<EntryKey, TranslationEntry>,
    headers: BTreeMap<String, String>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry`, replacing and returning any entry with the same key.
    pub fn insert(&mut self, entry: TranslationEntry) -> Option<TranslationEntry> {
        self.entries.insert(entry.key(), entry)
    }

    pub fn entry(&self, text: &str, context: Option<&str>) -> Option<&TranslationEntry> {
        match context {
            Some(context) => self.entries.get(EntryKey::new(Some(context), text).as_str()),
            None => self.entries.get(text),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Copies in every entry and header of `other` whose key is not already
    /// present. Existing entries are never replaced.
    pub fn merge_with(&mut self, other: TranslationCatalog) {
        for (key, entry) in other.entries {
            self.entries.entry(key).or_insert(entry);
        }
        for (name, value) in other.headers {
            self.headers.entry(name).or_insert(value);
        }
    }

    fn variant(&self, text: &str, context: Option<&str>, index: usize) -> Option<&str> {
        self.entry(text, context)
            .and_then(|entry| entry.translation(index))
            .filter(|translated| !translated.is_empty())
    }
}

impl Translations for TranslationCatalog {
    fn translate<'a>(&'a self, text: &'a str, context: Option<&str>) -> &'a str {
        self.variant(text, context, 0).unwrap_or(text)
    }

    fn translate_plural<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        index: usize,
        context: Option<&str>,
    ) -> &'a str {
        self.variant(singular, context, index)
            .unwrap_or_else(|| untranslated(singular, plural, index))
    }
}

/// What a text domain holds: either nothing loaded yet, or a parsed catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainCatalog {
    Noop(NoopTranslations),
    Loaded(TranslationCatalog),
}

impl Default for DomainCatalog {
    fn default() -> Self {
        DomainCatalog::Noop(NoopTranslations)
    }
}

impl DomainCatalog {
    pub fn is_noop(&self) -> bool {
        matches!(self, DomainCatalog::Noop(_))
    }

    pub fn as_catalog(&self) -> Option<&TranslationCatalog> {
        match self {
            DomainCatalog::Noop(_) => None,
            DomainCatalog::Loaded(catalog) => Some(catalog),
        }
    }

    /// Folds a freshly loaded catalog into this domain. A no-op domain is
    /// replaced; a loaded one keeps its entries on conflict.
    pub fn merge_with(&mut self, incoming: TranslationCatalog) {
        match self {
            DomainCatalog::Noop(_) => *self = DomainCatalog::Loaded(incoming),
            DomainCatalog::Loaded(existing) => existing.merge_with(incoming),
        }
    }
}

impl From<TranslationCatalog> for DomainCatalog {
    fn from(catalog: TranslationCatalog) -> Self {
        DomainCatalog::Loaded(catalog)
    }
}

impl Translations for DomainCatalog {
    fn translate<'a>(&'a self, text: &'a str, context: Option<&str>) -> &'a str {
        match self {
            DomainCatalog::Noop(noop) => noop.translate(text, context),
            DomainCatalog::Loaded(catalog) => catalog.translate(text, context),
        }
    }

    fn translate_plural<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        index: usize,
        context: Option<&str>,
    ) -> &'a str {
        match self {
            DomainCatalog::Noop(noop) => noop.translate_plural(singular, plural, index, context),
            DomainCatalog::Loaded(catalog) => {
                catalog.translate_plural(singular, plural, index, context)
            }
        }
    }
}
