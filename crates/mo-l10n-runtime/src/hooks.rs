use std::fmt;

type LocaleFilter = Box<dyn Fn(String) -> String + Send + Sync>;
type GettextFilter = Box<dyn Fn(String, &str, &str) -> String + Send + Sync>;
type GettextWithContextFilter = Box<dyn Fn(String, &str, &str, &str) -> String + Send + Sync>;
type UnloadOverride = Box<dyn Fn(bool, &str) -> bool + Send + Sync>;

/// Value-transforming callbacks run at fixed points of translation. Each hook
/// runs its callbacks in registration order, feeding each result to the next;
/// with nothing registered the value passes through untouched.
#[derive(Default)]
pub struct Hooks {
    locale: Vec<LocaleFilter>,
    gettext: Vec<GettextFilter>,
    gettext_with_context: Vec<GettextWithContextFilter>,
    override_unload_textdomain: Vec<UnloadOverride>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(resolved_locale) -> locale`, run once before the locale is cached.
    pub fn on_locale<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.locale.push(Box::new(filter));
        self
    }

    /// `(translated, original, domain) -> translated`
    pub fn on_gettext<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(String, &str, &str) -> String + Send + Sync + 'static,
    {
        self.gettext.push(Box::new(filter));
        self
    }

    /// `(translated, original, context, domain) -> translated`
    pub fn on_gettext_with_context<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(String, &str, &str, &str) -> String + Send + Sync + 'static,
    {
        self.gettext_with_context.push(Box::new(filter));
        self
    }

    /// `(overridden, domain) -> overridden`; a final `true` skips the unload.
    pub fn on_override_unload_textdomain<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(bool, &str) -> bool + Send + Sync + 'static,
    {
        self.override_unload_textdomain.push(Box::new(filter));
        self
    }

    pub fn apply_locale(&self, locale: String) -> String {
        self.locale.iter().fold(locale, |locale, filter| filter(locale))
    }

    pub fn apply_gettext(&self, translated: String, original: &str, domain: &str) -> String {
        self.gettext
            .iter()
            .fold(translated, |translated, filter| filter(translated, original, domain))
    }

    pub fn apply_gettext_with_context(
        &self,
        translated: String,
        original: &str,
        context: &str,
        domain: &str,
    ) -> String {
        self.gettext_with_context
            .iter()
            .fold(translated, |translated, filter| {
                filter(translated, original, context, domain)
            })
    }

    pub fn apply_override_unload_textdomain(&self, domain: &str) -> bool {
        self.override_unload_textdomain
            .iter()
            .fold(false, |overridden, filter| filter(overridden, domain))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("locale", &self.locale.len())
            .field("gettext", &self.gettext.len())
            .field("gettext_with_context", &self.gettext_with_context.len())
            .field(
                "override_unload_textdomain",
                &self.override_unload_textdomain.len(),
            )
            .finish()
    }
}
