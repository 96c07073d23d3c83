use std::collections::BTreeMap;
use std::path::Path;

use mo_l10n_core::{DomainCatalog, TranslationCatalog};
use tracing::{debug, warn};

use crate::error::RuntimeResult;
use crate::loader::read_catalog;

/// Text domains known to one request, keyed by domain name.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: BTreeMap<String, DomainCatalog>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` into `domain`, reporting failure as `false`. A failed load
    /// leaves the registry untouched.
    pub fn load(&mut self, domain: &str, path: &Path) -> bool {
        match self.try_load(domain, path) {
            Ok(()) => true,
            Err(err) => {
                warn!(domain, path = %path.display(), error = %err, "failed to load text domain");
                false
            }
        }
    }

    pub fn try_load(&mut self, domain: &str, path: &Path) -> RuntimeResult<()> {
        let catalog = read_catalog(path)?;
        let entries = catalog.len();
        self.install(domain, catalog);
        debug!(domain, path = %path.display(), entries, "loaded text domain");
        Ok(())
    }

    /// Installs `catalog` for `domain`, merging into what is already there.
    /// Entries already present win over the incoming ones.
    pub fn install(&mut self, domain: &str, catalog: TranslationCatalog) {
        match self.domains.get_mut(domain) {
            Some(existing) => existing.merge_with(catalog),
            None => {
                self.domains
                    .insert(domain.to_string(), DomainCatalog::Loaded(catalog));
            }
        }
    }

    pub fn unload(&mut self, domain: &str) -> bool {
        let removed = self.domains.remove(domain).is_some();
        if removed {
            debug!(domain, "unloaded text domain");
        }
        removed
    }

    /// Returns the catalog for `domain`, installing a no-op one on first use.
    pub fn get_or_create(&mut self, domain: &str) -> &DomainCatalog {
        if !self.domains.contains_key(domain) {
            self.domains
                .insert(domain.to_string(), DomainCatalog::default());
        }
        &self.domains[domain]
    }

    pub fn get(&self, domain: &str) -> Option<&DomainCatalog> {
        self.domains.get(domain)
    }

    pub fn is_loaded(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }
}
