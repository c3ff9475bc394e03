pub mod static_index;
