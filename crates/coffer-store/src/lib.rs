//! coffer-store: encrypted object store over a local data directory
//!
//! Layout: `{data_dir}/{store}/{object_id}` — one file per object,
//! containing exactly one sealed frame (see coffer-crypto). Store
//! directories are created lazily on first put; there is no manifest
//! or index, the filesystem is the source of truth.

pub mod path;
pub mod store;

pub use store::{ObjectStore, PutOutcome};
