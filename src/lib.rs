pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod store;
pub mod tools;
pub mod ui;
pub mod workflow;

pub use error::{BuildCutError, Result};
