//! # propdb engine
//!
//! Key-value engine trait and implementations for propdb.
//!
//! This crate provides the lowest-level storage abstraction for the
//! property store. Engines are **opaque key-value stores** over byte-string
//! keys and values - they do not interpret the data they hold, and the
//! property layer above never sees an engine's native call shape or error
//! vocabulary.
//!
//! ## Design Principles
//!
//! - One trait object per engine, selected at configuration time
//! - Keys and values are opaque [`Datum`] byte strings
//! - One [`EngineDb`] session per open database; released on drop
//! - No cross-process arbitration: contention behavior is inherited
//!   from the engine as-is
//!
//! ## Available Engines
//!
//! - [`LogEngine`] - Persistent, two physical files per logical database
//! - [`MemoryEngine`] - For testing and ephemeral stores
//!
//! ## Example
//!
//! ```rust
//! use propdb_engine::{Engine, EngineDb, MemoryEngine, OpenMode};
//! use std::path::Path;
//!
//! let engine = MemoryEngine::new();
//! let mut db = engine.open(Path::new("props"), OpenMode::ReadWrite).unwrap();
//! db.store(b"color", b"red").unwrap();
//! let value = db.fetch(b"color").unwrap();
//! assert_eq!(value.unwrap().as_bytes(), b"red");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod datum;
mod engine;
mod error;
mod log;
mod memory;

pub use config::LogConfig;
pub use datum::Datum;
pub use engine::{Engine, EngineDb, OpenMode};
pub use error::{EngineError, EngineResult};
pub use log::{LogEngine, DIR_EXT, PAG_EXT};
pub use memory::MemoryEngine;
