pub mod config;
pub mod section;

pub use config::*;
pub use section::*;
