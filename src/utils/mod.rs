//! Utility modules for common functionality

pub mod filesystem;

// Re-export commonly used functions
pub use filesystem::{ensure_directory_exists, read_local_file, write_output};
