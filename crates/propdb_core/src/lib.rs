//! # propdb core
//!
//! Per-resource property database core for filesystem repositories.
//!
//! A document-management layer (WebDAV-style) persists metadata
//! properties alongside the files and directories it serves. Each
//! filesystem object gets its own small key-value database, kept in a
//! hidden state subdirectory next to the object. This crate provides:
//!
//! - the naming scheme mapping a resource to its database path
//!   ([`path`] module)
//! - the open/read/write/iterate/close lifecycle of one database
//!   ([`PropDb`])
//! - uniform error translation over interchangeable engines
//!   ([`DbError`])
//!
//! The engine itself comes from [`propdb_engine`] and is chosen at
//! configuration time; callers pass it wherever a database is opened.
//!
//! ## Example
//!
//! ```no_run
//! use propdb_core::{FsResource, PropDb};
//! use propdb_engine::LogEngine;
//!
//! # fn main() -> Result<(), propdb_core::DbError> {
//! let engine = LogEngine::new();
//! let resource = FsResource::file("/srv/docs", "report.txt");
//!
//! let mut db = PropDb::open(&engine, &resource, false)?.unwrap();
//! db.store("color", "red")?;
//! db.close();
//!
//! if let Some(mut db) = PropDb::open(&engine, &resource, true)? {
//!     assert_eq!(db.fetch("color").unwrap().as_bytes(), b"red");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! This core is fully synchronous, performs no retries, and does not
//! arbitrate concurrent writers; values are opaque byte strings whose
//! meaning belongs to the property-management layer above.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod db;
mod error;
pub mod path;
mod resource;

pub use db::PropDb;
pub use error::{DbError, DbResult, HTTP_INTERNAL_SERVER_ERROR};
pub use resource::{FsResource, ResourcePaths};

// Re-exported so callers can configure an engine without a direct
// dependency on the engine crate.
pub use propdb_engine::{Datum, Engine, EngineDb, LogConfig, LogEngine, MemoryEngine, OpenMode};
