//! blogdash-http - HTTP-backed post service.
//!
//! Speaks the json-server REST dialect: `GET /{collection}` returns the
//! whole collection and `DELETE /{collection}/{id}` removes one item.

mod client;
mod service;

pub use service::{HttpConfig, HttpPostService};
