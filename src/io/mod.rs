// External I/O operations module
pub mod signals; // Shutdown signal handling
