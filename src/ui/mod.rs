//! # User Interface
//!
//! Colored terminal messages and the startup banner.

pub mod log;

pub use log::{debug, error, info, print_logo, success, warn, Log};
