//! `tierkv-hostapi` — shared types for the TierKV contract key-value layer.
//!
//! This crate defines the pieces both the gateway and any storage backend
//! need to agree on:
//!
//! - `KvError` — call-local error taxonomy with `i32` ABI code conversion
//! - `KvLimits` — per-session size and iterator budgets
//! - `VersionedStore` trait — the backing-store abstraction
//! - `MemStore` — in-memory `VersionedStore` for tests and embedders
//!   without a persistent backend
//! - `nskey` — the namespace-key byte layout and the `Tier` enum
//!
//! The gateway crate (`tierkv-gateway`) builds the sandbox-facing call
//! surface on top of these.

pub mod error;
pub mod limits;
pub mod mem_store;
pub mod nskey;
pub mod store;

// Re-export commonly used types at the crate root.
pub use error::KvError;
pub use limits::KvLimits;
pub use mem_store::MemStore;
pub use nskey::Tier;
pub use store::VersionedStore;
