pub mod diff_viewer;
pub mod output_format;
pub mod rules_table;
pub mod summary;
pub mod theme;
