pub mod error;
pub mod handler;
pub mod interactions;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{AppState, create_app};
