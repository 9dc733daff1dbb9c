//! The sync engine
//!
//! Owns in-memory product state, favorite state, and the offline queue, and
//! orchestrates when and how offline records get pushed:
//! - Fetch with favorite reconciliation against the persisted identity set
//! - At-most-once online submission, durable buffering while offline
//! - FIFO replay of the offline queue on reconnection
//!
//! State is published as snapshots through a watch channel; the presentation
//! layer subscribes or polls and never reaches into the engine's internals.

mod core;
mod state;


pub use self::core::SyncEngine;
pub use state::{CatalogSnapshot, Notice};
