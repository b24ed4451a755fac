pub mod config;
pub mod logging;

pub mod engine;
pub mod error;
pub mod intake;
pub mod link_db;
pub mod normalize;

pub use error::{Error, Result};
