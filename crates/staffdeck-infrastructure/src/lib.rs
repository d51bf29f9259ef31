//! Infrastructure layer of the Staffdeck client.
//!
//! Concrete implementations of the core trait seams: the reqwest HTTP
//! client, the two storage scopes, the shared bearer-token slot, and
//! configuration loading.

pub mod config;
pub mod http_api;
pub mod json_file_store;
pub mod memory_store;
pub mod token;

pub use config::ClientConfig;
pub use http_api::HttpApi;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use token::TokenCell;
