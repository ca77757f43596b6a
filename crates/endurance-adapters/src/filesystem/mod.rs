//! Filesystem adapters implementing the core `Filesystem` port.
//!
//! `LocalFilesystem` talks to the disk; `MemoryFilesystem` keeps a tree in
//! memory for service-level tests.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
