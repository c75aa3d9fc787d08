#![warn(rust_2018_idioms)]

pub mod app;
pub mod artifacts;
pub mod config;
pub mod domain;
pub mod error;
pub mod explain;
pub mod handler;
pub mod healthcheck;
pub mod model;
pub mod port;
pub mod preprocess;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use healthcheck::{healthcheck, healthcheck_with_port};
