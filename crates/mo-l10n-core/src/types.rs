use alloc::borrow::Borrow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Separates the context from the original text inside a key region.
pub const CONTEXT_SEPARATOR: char = '\u{4}';
/// Separates plural forms inside key and translation regions.
pub const PLURAL_SEPARATOR: char = '\0';

/// Composite lookup key, stored in its encoded `context\x04original` form so
/// context-free lookups can borrow the text directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(String);

impl EntryKey {
    pub fn new(context: Option<&str>, original: &str) -> Self {
        match context {
            Some(context) => {
                let mut encoded = String::with_capacity(context.len() + 1 + original.len());
                encoded.push_str(context);
                encoded.push(CONTEXT_SEPARATOR);
                encoded.push_str(original);
                Self(encoded)
            }
            None => Self(String::from(original)),
        }
    }

    pub fn context(&self) -> Option<&str> {
        self.0
            .split_once(CONTEXT_SEPARATOR)
            .map(|(context, _)| context)
    }

    pub fn original(&self) -> &str {
        match self.0.split_once(CONTEXT_SEPARATOR) {
            Some((_, original)) => original,
            None => self.0.as_str(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for EntryKey {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context() {
            Some(context) => write!(f, "{context}|{}", self.original()),
            None => f.write_str(self.original()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationEntry {
    pub context: Option<String>,
    pub original: String,
    pub plural: Option<String>,
    /// Index 0 is the singular form; the rest are plural forms.
    pub translations: Vec<String>,
}

impl TranslationEntry {
    pub fn new(original: impl Into<String>, translations: Vec<String>) -> Self {
        Self {
            context: None,
            original: original.into(),
            plural: None,
            translations,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.context.as_deref(), &self.original)
    }

    pub fn translation(&self, index: usize) -> Option<&str> {
        self.translations.get(index).map(String::as_str)
    }
}
