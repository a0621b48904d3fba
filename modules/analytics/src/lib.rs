pub mod chat;
pub mod dashboard;
pub mod endpoints;
pub mod error;

pub use endpoints::configure;
pub use error::Error;
