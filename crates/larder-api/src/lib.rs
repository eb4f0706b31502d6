// larder-api: Async Rust client for the Larder household-inventory backend

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::Client;
pub use error::Error;
pub use transport::TransportConfig;
