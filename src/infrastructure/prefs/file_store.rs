use crate::domain::error::DomainError;
use crate::domain::ports::preference_store::PreferenceStore;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASKETS_KEY: &str = "defaultBaskets";

/// JSON-file preference store. The file is a flat object of named keys;
/// the default basket selection lives under `defaultBaskets` as an array
/// of basket names, matching the original dashboard's storage contract.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location, overridable with ALERTDESK_PREFS.
    pub fn default_path() -> Self {
        let path = std::env::var("ALERTDESK_PREFS")
            .unwrap_or_else(|_| "./alertdesk-prefs.json".into());
        Self::new(path)
    }

    fn read_all(&self) -> Result<serde_json::Map<String, serde_json::Value>, DomainError> {
        if !Path::exists(&self.path) {
            return Ok(serde_json::Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(DomainError::Parse(format!(
                "preference file {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(
        &self,
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), DomainError> {
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_default_baskets(&self) -> Result<Option<Vec<String>>, DomainError> {
        let map = self.read_all()?;
        let Some(value) = map.get(DEFAULT_BASKETS_KEY) else {
            return Ok(None);
        };
        let baskets: Vec<String> = serde_json::from_value(value.clone())?;
        if baskets.is_empty() {
            return Ok(None);
        }
        Ok(Some(baskets))
    }

    fn save_default_baskets(&self, baskets: &[String]) -> Result<(), DomainError> {
        let mut map = self.read_all()?;
        map.insert(
            DEFAULT_BASKETS_KEY.to_string(),
            serde_json::json!(baskets),
        );
        self.write_all(&map)
    }

    fn clear_default_baskets(&self) -> Result<(), DomainError> {
        let mut map = self.read_all()?;
        if map.remove(DEFAULT_BASKETS_KEY).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}
