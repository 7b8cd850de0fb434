// Domain layer: session model, error contract, and injectable ports.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::Session;
pub use errors::ApiError;
