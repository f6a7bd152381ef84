//! Utility functions for status output.

pub mod format;

pub use format::format_size;
