#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod catalog;
mod error;
mod mo;
mod negotiation;
mod types;

pub use catalog::{DomainCatalog, NoopTranslations, TranslationCatalog, Translations};
pub use error::{CoreError, CoreResult};
pub use mo::{ByteOrder, MO_MAGIC, MoHeader, parse_mo, parse_mo_header};
pub use negotiation::{
    AvailableLocales, NegotiationResult, NegotiationSource, NegotiationTrace, negotiate,
    negotiate_with_trace,
};
pub use types::{CONTEXT_SEPARATOR, EntryKey, PLURAL_SEPARATOR, TranslationEntry};
