pub mod alert_feed;
pub mod basket_index;
pub mod preference_store;
