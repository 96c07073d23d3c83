use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// The locales a deployment ships catalogs for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableLocales {
    locales: BTreeSet<String>,
}

impl AvailableLocales {
    pub fn from_list<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locales = locales
            .into_iter()
            .map(|locale| String::from(locale.as_ref().trim()))
            .filter(|locale| !locale.is_empty())
            .collect();
        Self { locales }
    }

    /// Accepts the comma-separated configuration form, e.g. `"en, fr,de"`.
    pub fn parse(list: &str) -> Self {
        Self::from_list(list.split(','))
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains(locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegotiationSource {
    /// A client preference matched an available locale.
    Preference,
    /// Nothing matched and the configured default was used.
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiationResult {
    pub selected: String,
    pub source: NegotiationSource,
    pub trace: Option<NegotiationTrace>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiationTrace {
    pub attempts: Vec<String>,
}

/// Picks the first locale of an `Accept-Language` style header that is
/// available, in client order. Quality suffixes are dropped, not ranked.
///
/// Returns `None` when the header expresses no preference at all; callers
/// then use `default_locale` directly.
pub fn negotiate(
    header: &str,
    available: &AvailableLocales,
    default_locale: &str,
) -> Option<NegotiationResult> {
    negotiate_internal(header, available, default_locale, false)
}

pub fn negotiate_with_trace(
    header: &str,
    available: &AvailableLocales,
    default_locale: &str,
) -> Option<NegotiationResult> {
    negotiate_internal(header, available, default_locale, true)
}

fn negotiate_internal(
    header: &str,
    available: &AvailableLocales,
    default_locale: &str,
    with_trace: bool,
) -> Option<NegotiationResult> {
    if header.trim().is_empty() {
        return None;
    }

    let mut trace = if with_trace {
        Some(NegotiationTrace {
            attempts: Vec::new(),
        })
    } else {
        None
    };

    for candidate in header.split(',').filter_map(preference_tag) {
        if let Some(trace) = trace.as_mut() {
            trace.attempts.push(String::from(candidate));
        }
        if available.contains(candidate) {
            return Some(NegotiationResult {
                selected: String::from(candidate),
                source: NegotiationSource::Preference,
                trace,
            });
        }
    }

    Some(NegotiationResult {
        selected: String::from(default_locale),
        source: NegotiationSource::Default,
        trace,
    })
}

fn preference_tag(entry: &str) -> Option<&str> {
    let tag = entry.split(';').next().unwrap_or_default().trim();
    if tag.is_empty() { None } else { Some(tag) }
}
