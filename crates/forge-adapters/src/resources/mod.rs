//! Byte sources for binary artifacts.

mod directory;
mod memory;

pub use directory::DirectoryByteSource;
pub use memory::MemoryByteSource;
