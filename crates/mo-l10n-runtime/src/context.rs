use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use mo_l10n_core::{Translations, negotiate};
use tracing::debug;

use crate::config::L10nConfig;
use crate::hooks::Hooks;
use crate::pageinfo::{PageInfo, translate_pageinfo};
use crate::registry::DomainRegistry;

pub const DEFAULT_DOMAIN: &str = "default";

/// Translation state for one request: the loaded text domains, the hooks and
/// the locale, which is resolved on first use and then fixed.
#[derive(Debug)]
pub struct L10nContext {
    config: L10nConfig,
    content_root: PathBuf,
    accept_language: Option<String>,
    hooks: Hooks,
    registry: DomainRegistry,
    locale: OnceCell<String>,
}

impl L10nContext {
    pub fn new(config: L10nConfig, content_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_root: content_root.into(),
            accept_language: None,
            hooks: Hooks::new(),
            registry: DomainRegistry::new(),
            locale: OnceCell::new(),
        }
    }

    /// Raw `Accept-Language` header of the request.
    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language = Some(header.into());
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &L10nConfig {
        &self.config
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DomainRegistry {
        &mut self.registry
    }

    pub fn locale(&self) -> &str {
        self.locale.get_or_init(|| self.resolve_locale())
    }

    fn resolve_locale(&self) -> String {
        let settings = &self.config.locale;
        let available = settings.available.to_available();
        let header = self.accept_language.as_deref().unwrap_or_default();
        let selected = match negotiate(header, &available, &settings.default) {
            Some(result) => {
                debug!(locale = %result.selected, source = ?result.source, "negotiated locale");
                result.selected
            }
            None => {
                debug!(locale = %settings.default, "no language preference, using default locale");
                settings.default.clone()
            }
        };
        self.hooks.apply_locale(selected)
    }

    pub fn translate(&mut self, text: &str, domain: &str) -> String {
        let translated = self
            .registry
            .get_or_create(domain)
            .translate(text, None)
            .to_string();
        self.hooks.apply_gettext(translated, text, domain)
    }

    pub fn translate_with_context(&mut self, text: &str, context: &str, domain: &str) -> String {
        let translated = self
            .registry
            .get_or_create(domain)
            .translate(text, Some(context))
            .to_string();
        self.hooks
            .apply_gettext_with_context(translated, text, context, domain)
    }

    /// `index` selects the plural form; choosing it for a count is up to the caller.
    pub fn translate_plural(
        &mut self,
        singular: &str,
        plural: &str,
        index: usize,
        domain: &str,
    ) -> String {
        self.registry
            .get_or_create(domain)
            .translate_plural(singular, plural, index, None)
            .to_string()
    }

    pub fn load_textdomain(&mut self, domain: &str, path: impl AsRef<Path>) -> bool {
        self.registry.load(domain, path.as_ref())
    }

    pub fn unload_textdomain(&mut self, domain: &str) -> bool {
        if self.hooks.apply_override_unload_textdomain(domain) {
            debug!(domain, "text domain unload overridden");
            return true;
        }
        self.registry.unload(domain)
    }

    pub fn is_textdomain_loaded(&self, domain: &str) -> bool {
        self.registry.is_loaded(domain)
    }

    /// `<content_root>/<folder>/<locale>.mo`
    pub fn default_catalog_path(&self) -> PathBuf {
        self.content_root
            .join(self.config.locale.folder())
            .join(format!("{}.mo", self.locale()))
    }

    pub fn load_default_textdomain(&mut self) -> bool {
        let path = self.default_catalog_path();
        self.load_textdomain(DEFAULT_DOMAIN, path)
    }

    pub fn translate_pageinfo(&mut self, pageinfo: PageInfo) -> PageInfo {
        let fields = self.config.locale.pageinfo_fields();
        translate_pageinfo(pageinfo, &fields, &mut |text: &str| {
            self.translate(text, DEFAULT_DOMAIN)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{DEFAULT_DOMAIN, L10nContext};
    use crate::config::{L10nConfig, LocaleList};
    use crate::hooks::Hooks;
    use crate::pageinfo::{PageInfo, PageValue};
    use crate::test_support::build_mo;

    fn config() -> L10nConfig {
        let mut config = L10nConfig::default();
        config.locale.available = LocaleList::Csv("en,fr,de".to_string());
        config.locale.default = "en".to_string();
        config
    }

    fn content_root_with(locale: &str, entries: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("dir");
        let folder = dir.path().join("languages");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(folder.join(format!("{locale}.mo")), build_mo(entries)).expect("write mo");
        dir
    }

    #[test]
    fn negotiates_first_available_preference() {
        let context =
            L10nContext::new(config(), "/srv/content").with_accept_language("es,fr;q=0.8,de");
        assert_eq!(context.locale(), "fr");
    }

    #[test]
    fn empty_header_uses_default() {
        let context = L10nContext::new(config(), "/srv/content").with_accept_language("");
        assert_eq!(context.locale(), "en");
        let context = L10nContext::new(config(), "/srv/content");
        assert_eq!(context.locale(), "en");
    }

    #[test]
    fn locale_is_resolved_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut hooks = Hooks::new();
        hooks.on_locale(move |locale| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("{locale}-CH")
        });
        let context = L10nContext::new(config(), "/srv/content")
            .with_accept_language("de")
            .with_hooks(hooks);
        assert_eq!(context.locale(), "de-CH");
        assert_eq!(context.locale(), "de-CH");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn default_catalog_path_follows_folder_and_locale() {
        let mut config = config();
        config.locale.folder = "i18n".to_string();
        let context = L10nContext::new(config, "/srv/content").with_accept_language("fr");
        assert_eq!(
            context.default_catalog_path(),
            std::path::Path::new("/srv/content/i18n/fr.mo")
        );
    }

    #[test]
    fn loads_default_textdomain_and_translates() {
        let root = content_root_with("fr", &[("Hello", "Bonjour"), ("menu\u{4}Open", "Ouvrir")]);
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("fr");
        assert!(context.load_default_textdomain());
        assert!(context.is_textdomain_loaded(DEFAULT_DOMAIN));
        assert_eq!(context.translate("Hello", DEFAULT_DOMAIN), "Bonjour");
        assert_eq!(context.translate("Goodbye", DEFAULT_DOMAIN), "Goodbye");
        assert_eq!(context.translate_with_context("Open", "menu", DEFAULT_DOMAIN), "Ouvrir");
        assert_eq!(context.translate("Open", DEFAULT_DOMAIN), "Open");
    }

    #[test]
    fn empty_text_never_yields_catalog_headers() {
        let root = content_root_with(
            "en",
            &[
                ("", "Language: en\nContent-Type: text/plain; charset=UTF-8\n"),
                ("Hello", "Hi"),
            ],
        );
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("en");
        assert!(context.load_default_textdomain());
        assert_eq!(context.translate("", DEFAULT_DOMAIN), "");
        assert_eq!(context.translate("Hello", DEFAULT_DOMAIN), "Hi");
    }

    #[test]
    fn missing_default_catalog_is_not_fatal() {
        let root = tempfile::tempdir().expect("dir");
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("de");
        assert!(!context.load_default_textdomain());
        assert_eq!(context.translate("Hello", DEFAULT_DOMAIN), "Hello");
    }

    #[test]
    fn plural_lookup_uses_caller_index() {
        let root = content_root_with("fr", &[("%d file\0%d files", "%d fichier\0%d fichiers")]);
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("fr");
        assert!(context.load_default_textdomain());
        assert_eq!(
            context.translate_plural("%d file", "%d files", 1, DEFAULT_DOMAIN),
            "%d fichiers"
        );
        assert_eq!(
            context.translate_plural("%d dir", "%d dirs", 1, DEFAULT_DOMAIN),
            "%d dirs"
        );
    }

    #[test]
    fn gettext_hooks_see_original_and_domain() {
        let root = content_root_with("fr", &[("Hello", "Bonjour"), ("ctx\u{4}Hi", "Salut")]);
        let mut hooks = Hooks::new();
        hooks
            .on_gettext(|translated, original, domain| format!("{domain}:{original}={translated}"))
            .on_gettext_with_context(|translated, _, context, _| {
                format!("{context}>{translated}")
            });
        let mut context = L10nContext::new(config(), root.path())
            .with_accept_language("fr")
            .with_hooks(hooks);
        assert!(context.load_default_textdomain());
        assert_eq!(context.translate("Hello", DEFAULT_DOMAIN), "default:Hello=Bonjour");
        assert_eq!(context.translate_with_context("Hi", "ctx", DEFAULT_DOMAIN), "ctx>Salut");
    }

    #[test]
    fn unload_override_short_circuits() {
        let root = content_root_with("fr", &[("Hello", "Bonjour")]);
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("fr");
        context
            .hooks_mut()
            .on_override_unload_textdomain(|_, domain| domain == DEFAULT_DOMAIN);
        assert!(context.load_default_textdomain());
        assert!(context.unload_textdomain(DEFAULT_DOMAIN));
        assert!(context.is_textdomain_loaded(DEFAULT_DOMAIN));
        assert!(!context.unload_textdomain("other"));
    }

    #[test]
    fn unload_twice_reports_removal_once() {
        let root = content_root_with("fr", &[("Hello", "Bonjour")]);
        let mut context = L10nContext::new(config(), root.path()).with_accept_language("fr");
        assert!(context.load_default_textdomain());
        assert!(context.unload_textdomain(DEFAULT_DOMAIN));
        assert!(!context.unload_textdomain(DEFAULT_DOMAIN));
        assert_eq!(context.translate("Hello", DEFAULT_DOMAIN), "Hello");
    }

    #[test]
    fn translates_configured_pageinfo_fields() {
        let root = content_root_with("fr", &[("Home", "Accueil"), ("News", "Actualités")]);
        let mut config = config();
        config.locale.pageinfo = vec!["title".to_string(), "tags".to_string()];
        let mut context = L10nContext::new(config, root.path()).with_accept_language("fr");
        assert!(context.load_default_textdomain());

        let mut pageinfo = PageInfo::new();
        pageinfo.insert("title".to_string(), PageValue::Scalar("Home".to_string()));
        pageinfo.insert("tags".to_string(), PageValue::Sequence(vec!["News".to_string()]));
        pageinfo.insert("author".to_string(), PageValue::Scalar("Home".to_string()));

        let translated = context.translate_pageinfo(pageinfo);
        assert_eq!(translated["title"], PageValue::Scalar("Accueil".to_string()));
        assert_eq!(translated["tags"], PageValue::Sequence(vec!["Actualités".to_string()]));
        assert_eq!(translated["author"], PageValue::Scalar("Home".to_string()));
    }
}
