//! Core library for the `volley` CLI.
//!
//! `volley` fires a fixed number of HTTP GET requests at one URL from a pool of
//! concurrent workers and summarises the response status codes. The pieces are
//! split so they can be driven without the binary: argument and config types,
//! the single-request executor, the load driver, and report rendering.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod load;
pub mod logger;
pub mod report;
