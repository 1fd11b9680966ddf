#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod log;
pub mod selectors;
pub mod tools;
pub mod types;

mod tests;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use types::*;
