/// Program and memory image files.
pub mod loader;
