pub mod commands;
pub mod domain;
pub mod error;
pub mod http;
pub mod runtime;
pub mod store;

pub use error::{Error, Result};
