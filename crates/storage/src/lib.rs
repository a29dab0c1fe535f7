#![forbid(unsafe_code)]

pub mod http;
pub mod memory;
pub mod repository;
pub mod sqlite;

pub use http::{ApiConfig, HttpGateway};
pub use memory::InMemoryGateway;
pub use repository::{Gateway, GatewayError, LocalStore, StorageError};
