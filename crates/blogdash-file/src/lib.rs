//! blogdash-file - File-backed post service.
//!
//! Reads and writes a json-server style `db.json`, so a local copy of the
//! blog database can stand in for the network service.

mod service;
mod store;

pub use service::FilePostService;
pub use store::{DB_FILE_NAME, FileStore};
