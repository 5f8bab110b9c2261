use autolobby_core::ConfigStore;
use serde::Deserialize;
use std::collections::BTreeMap;

/// In-memory `(section, key) -> value` store, deserializable from a JSON
/// object of sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    #[serde(flatten)]
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryConfig {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn get(&self, section: &str, key: &str) -> Option<&String> {
        self.sections.get(section).and_then(|keys| keys.get(key))
    }
}

impl ConfigStore for MemoryConfig {
    fn string(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get(section, key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }
}
