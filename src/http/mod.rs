mod client;

pub use client::TimeoutClient;
