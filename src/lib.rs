// Library for the binary and integration tests

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod timeline;
pub mod version;
pub mod writer;

pub use error::{GenError, Result};
