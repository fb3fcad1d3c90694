pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod validation;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use types::*;
