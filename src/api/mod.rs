mod client;
mod instance;
pub mod types;

pub use client::{api_endpoint, Credentials, TcatClient, DEFAULT_TIMEOUT};
pub use instance::{ConnectOptions, Tcat};
pub use types::*;
