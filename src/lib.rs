pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod pipeline;
pub mod ui;

pub use error::{GhcError, Result};
