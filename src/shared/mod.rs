pub mod cache;
pub mod config;
pub mod errors;
pub mod utils;

// Re-exports for convenience
pub use cache::ReadCache;
pub use config::CatalogConfig;
pub use errors::{AppError, AppResult};
