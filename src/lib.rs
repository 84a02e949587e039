//! snipurl - a small URL shortener service
//!
//! Maps long URLs to 5-character identifiers and redirects visitors back
//! with a 308 while counting hits.
//!
//! # Architecture
//! - `store`: record store abstraction and backends (memory, redis)
//! - `ids`: short identifier generation
//! - `services`: the two core operations (shorten, redirect)
//! - `api`: actix-web HTTP binding
//! - `config`: environment-driven configuration

pub mod api;
pub mod config;
pub mod errors;
pub mod ids;
pub mod services;
pub mod store;
