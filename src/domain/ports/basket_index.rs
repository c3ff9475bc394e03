/// Externally-owned symbol -> basket membership table. `ALL` and `CUSTOM`
/// are filter-engine concepts and never reach this port.
pub trait BasketIndex: Send + Sync {
    fn is_member(&self, symbol: &str, basket: &str) -> bool;

    fn count(&self, basket: &str) -> usize;

    /// Names of the baskets this index knows about.
    fn baskets(&self) -> Vec<String>;
}
