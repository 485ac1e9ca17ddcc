pub mod config_service;
pub mod dto;
pub mod file_profile_store;
pub mod memory_profile_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_profile_store::FileProfileStore;
pub use crate::memory_profile_store::MemoryProfileStore;
pub use crate::paths::ProfilePaths;
