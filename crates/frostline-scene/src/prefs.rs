//! Persisted user preferences.

use std::collections::HashMap;

use frostline_common::SceneResult;

use crate::theme::ThemeField;

/// Key/value string storage for user preferences.
///
/// Only the three theme keys are ever written; there is no schema beyond
/// that.
pub trait PreferenceStore {
    /// Reads a value, `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str) -> SceneResult<()>;

    /// Deletes a value. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> SceneResult<()>;

    /// Deletes every theme key.
    fn clear_theme(&mut self) -> SceneResult<()> {
        for field in ThemeField::ALL {
            self.remove(field.key())?;
        }
        Ok(())
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> SceneResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SceneResult<()> {
        self.values.remove(key);
        Ok(())
    }
}
