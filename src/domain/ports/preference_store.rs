use crate::domain::error::DomainError;

/// Local persistence for UI preferences. The only preference the core
/// carries is the default basket selection, stored as a JSON array under a
/// single named key: read on startup, written on explicit save, removed on
/// reset.
pub trait PreferenceStore: Send + Sync {
    fn load_default_baskets(&self) -> Result<Option<Vec<String>>, DomainError>;

    fn save_default_baskets(&self, baskets: &[String]) -> Result<(), DomainError>;

    fn clear_default_baskets(&self) -> Result<(), DomainError>;
}
