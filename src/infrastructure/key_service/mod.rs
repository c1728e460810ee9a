//! Remote key service client

mod client;
mod wire;

pub use client::HttpKeyServiceClient;
