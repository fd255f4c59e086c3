//! Core modules: storage, configuration, errors and terminal plumbing.

pub mod broker;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod output;
pub mod schemas;
pub mod store;
pub mod time;
pub mod tui;
