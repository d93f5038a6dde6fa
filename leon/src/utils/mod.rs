pub mod clipboard;
pub mod rule_store;
