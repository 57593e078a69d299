//! Settings store adapters.

pub mod file;
pub mod memory;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
