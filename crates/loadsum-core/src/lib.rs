pub mod error;
pub mod pairing;
pub mod report;
pub mod sample;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
