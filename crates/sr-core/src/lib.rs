pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod reader;
pub mod utils;

pub use crate::core::support_resistance::SrDetector;
pub use crate::error::Error;
pub type Result<T> = std::result::Result<T, Error>;
