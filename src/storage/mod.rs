//! Storage layer for finsight
//!
//! Holds the record collections supplied by the fetch collaborator and the
//! JSON file helpers used to load them.

pub mod file_io;
pub mod init;
pub mod record_store;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use record_store::RecordStore;
