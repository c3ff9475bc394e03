pub mod baskets;
pub mod http;
pub mod prefs;
