pub mod config;
pub mod error;
pub mod logger;
pub mod style;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::error::CyonsError;
pub use crate::style::Style;
pub type Result<T> = std::result::Result<T, CyonsError>;
