//! User-facing console output.
//!
//! All styled output goes through the functions in `formatter`; the rest
//! of the crate never prints escape codes directly.

pub mod formatter;

pub use formatter::{
    display_error, display_key_value, display_status, display_success, display_warning,
};
