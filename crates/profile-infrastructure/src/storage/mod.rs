//! Low-level file primitives used by the file-backed stores.

pub mod atomic_file;

pub use atomic_file::AtomicTextFile;
