//! Command entry points used by the `packcalc` binary.
//!
//! Each command takes the runtime by value plus a [`Config`], opens the data
//! directory itself and prints its result to stdout.

mod calc;
pub mod config;
mod export;
mod import;
mod list;
mod paths;
mod rates;
mod remove;
pub mod render;

pub use calc::{CalcOptions, calc};
pub use config::Config;
pub use export::{default_export_name, export};
pub use import::import;
pub use list::list;
pub use rates::{rates_reset, rates_set, rates_show};
pub use remove::remove;
