//! Core traits for post service behavior.

mod service;

pub use service::PostService;
