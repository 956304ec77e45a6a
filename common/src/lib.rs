pub mod errors;
pub mod http_client;
pub mod models;
pub mod retry;
pub mod tracing;
