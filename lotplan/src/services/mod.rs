/// Typed failures of the external services
pub mod error;

/// Address search
pub mod geocode;

/// Basemap catalogue and tile server health checks
pub mod basemap;

pub use error::{ServiceError, ServiceResult};
