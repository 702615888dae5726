//! Persistence for wave resonance index snapshots.
//!
//! [`JsonDirectoryStore`] implements the core's
//! [`DocumentStore`](wave_resonance_core::DocumentStore) trait on a plain
//! directory of JSON artifacts, using async file I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use wave_resonance_storage::JsonDirectoryStore;
//!
//! let store = JsonDirectoryStore::new("/var/lib/resonance");
//! store.save_snapshot(&snapshot).await?;
//! let restored = store.load_snapshot().await?;
//! ```

pub mod error;
pub mod json_store;

pub use error::{StorageError, StorageResult};
pub use json_store::JsonDirectoryStore;
