//! memoria-storage
//!
//! Client-side transcript persistence. One store instance covers one viewer
//! session; entries inside it are keyed by tribute id.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
pub mod transcript;

pub use crate::error::StorageError;
pub use crate::file::FileStore;
pub use crate::memory::MemoryStore;
pub use crate::store::TranscriptStore;
