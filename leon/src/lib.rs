// leon/src/lib.rs
//! # Léon CLI Application
//!
//! This crate provides the command-line front end for `leon-core`: reading
//! text, cleaning the URLs in it, and managing the user's rule file.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
