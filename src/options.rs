use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde::Serialize;

pub const AKISMET_KEY_OPTION: &str = "Akismet_key";

/// Host-owned option storage.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, name: &str) -> Option<String>;

    /// Stores `value` only if the option has never been set.
    fn set_option_default(&self, name: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_option(&self, name: &str, value: impl Into<String>) {
        self.values.write().insert(name.to_string(), value.into());
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_option(&self, name: &str) -> Option<String> {
        self.values.read().get(name).cloned()
    }

    fn set_option_default(&self, name: &str, value: &str) {
        self.values
            .write()
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    TextBox,
    Checkbox,
    /// Rendered by the plugin through `handle_option`.
    Custom,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDescriptor {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: OptionKind,
    pub desc: &'static str,
}

pub fn supported_options() -> Vec<OptionDescriptor> {
    vec![OptionDescriptor {
        label: "Akismet API key",
        key: AKISMET_KEY_OPTION,
        kind: OptionKind::TextBox,
        desc: "Proper operation requires an <a href=\"https://akismet.com/signup/\">Akismet API key</a>.",
    }]
}

/// Reads the API key from the host store on every call.
#[derive(Clone)]
pub struct ApiKeySource {
    store: Arc<dyn OptionStore>,
}

impl ApiKeySource {
    /// Registers the empty default for the key option.
    pub fn register(store: Arc<dyn OptionStore>) -> Self {
        store.set_option_default(AKISMET_KEY_OPTION, "");
        tracing::debug!(target: "options", key = AKISMET_KEY_OPTION, "option default registered");
        Self { store }
    }

    pub fn api_key(&self) -> String {
        self.store.get_option(AKISMET_KEY_OPTION).unwrap_or_default()
    }
}
