#![warn(rust_2018_idioms)]

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod view;
