//! `tierkv-gateway` — sandbox-facing call surface for the TierKV layer.
//!
//! This crate translates untyped, bounds-unchecked calls from a contract
//! execution sandbox into safe operations on a shared versioned store.
//! It enforces:
//!
//! - **Bounds checking:** every raw `(ptr, len)` buffer argument is
//!   validated against the caller's addressable memory before use
//! - **Isolation:** a contract may mutate only its own namespace
//! - **Budgets:** key/value size limits and a concurrent-cursor budget
//! - **Traversal safety:** mid-traversal deletions surface as a distinct
//!   `Erased` cursor status, never as silent corruption
//!
//! The primary entry point is [`KvGateway`].

pub mod cursor;
pub mod gateway;
pub mod handles;
pub mod memory;
pub mod session;
pub mod view;

pub use cursor::{Cursor, CursorStatus};
pub use gateway::KvGateway;
pub use handles::HandleTable;
pub use session::Session;
pub use view::TierView;
