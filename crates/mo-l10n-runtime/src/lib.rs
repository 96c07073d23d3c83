#![forbid(unsafe_code)]

mod config;
mod context;
mod error;
mod hooks;
mod loader;
mod pageinfo;
mod registry;
#[cfg(test)]
mod test_support;

pub use crate::config::{
    L10nConfig, LocaleConfig, LocaleList, load_config, load_config_or_default,
};
pub use crate::context::{DEFAULT_DOMAIN, L10nContext};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::hooks::Hooks;
pub use crate::loader::{load_pageinfo, read_catalog};
pub use crate::pageinfo::{PageInfo, PageValue, translate_pageinfo};
pub use crate::registry::DomainRegistry;
pub use mo_l10n_core::{
    AvailableLocales, CoreError, DomainCatalog, NoopTranslations, TranslationCatalog,
    TranslationEntry, Translations,
};
