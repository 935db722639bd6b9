//! CLI definition, option parsing, and verb handlers

pub mod args;
pub mod handlers;
pub mod options;

pub use args::build_cli;
