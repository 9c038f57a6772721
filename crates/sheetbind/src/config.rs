//! Conversion configuration
//!
//! A [`Configuration`] is built once and passed to every conversion; there
//! is no process-wide state. Cloning is cheap: the registry, formatters and
//! message templates are shared.
//!
//! ```
//! use sheetbind::Configuration;
//! use sheetbind::Locale;
//!
//! let config = Configuration::default()
//!     .with_continue_type_bind_failure(true)
//!     .with_default_locale(Locale::parse("ja_JP").unwrap());
//! assert!(config.continue_type_bind_failure());
//! ```

use std::sync::Arc;

use crate::cell_format::{CellFormatter, DefaultCellFormatter};
use crate::format::FormatterResolver;
use crate::locale::Locale;
use crate::messages::MessageInterpolator;
use crate::registry::ConverterRegistry;

#[derive(Debug, Clone)]
pub struct Configuration {
    registry: Arc<ConverterRegistry>,
    formatters: Arc<FormatterResolver>,
    cell_formatter: Arc<dyn CellFormatter>,
    continue_type_bind_failure: bool,
    default_locale: Locale,
    messages: Arc<MessageInterpolator>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            registry: Arc::new(ConverterRegistry::with_defaults()),
            formatters: Arc::new(FormatterResolver::default()),
            cell_formatter: Arc::new(DefaultCellFormatter::default()),
            continue_type_bind_failure: false,
            default_locale: Locale::platform_default(),
            messages: Arc::new(MessageInterpolator::default()),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: Arc<ConverterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_formatters(mut self, formatters: FormatterResolver) -> Self {
        self.formatters = Arc::new(formatters);
        self
    }

    /// Replace how cell display text is produced
    pub fn with_cell_formatter(mut self, formatter: Arc<dyn CellFormatter>) -> Self {
        self.cell_formatter = formatter;
        self
    }

    /// Record type-bind failures and keep going instead of stopping the pass
    pub fn with_continue_type_bind_failure(mut self, enabled: bool) -> Self {
        self.continue_type_bind_failure = enabled;
        self
    }

    /// Locale for rules that name none
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn with_messages(mut self, messages: MessageInterpolator) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn formatters(&self) -> &FormatterResolver {
        &self.formatters
    }

    pub fn cell_formatter(&self) -> &dyn CellFormatter {
        self.cell_formatter.as_ref()
    }

    pub fn continue_type_bind_failure(&self) -> bool {
        self.continue_type_bind_failure
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn messages(&self) -> &MessageInterpolator {
        &self.messages
    }
}
