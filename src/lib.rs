//! Sliding-tile merge puzzle (workspace facade crate).
//!
//! The public API is `twenty48::{core,store,types}`; the implementation lives
//! in dedicated crates under `crates/`.

pub use twenty48_core as core;
pub use twenty48_store as store;
pub use twenty48_types as types;
