//! Coinbase module - Client implementation for the Coinbase Advanced Trade API

pub mod auth;
pub mod client;
pub mod messages;
pub mod rest;

pub use client::CoinbaseClient;
pub use rest::CoinbaseRestClient;
