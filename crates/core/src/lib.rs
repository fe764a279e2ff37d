// Unseal Core - Domain Logic & Ports
// NO infrastructure dependencies: process spawning lives in unseal-infra-system

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{CoreError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
