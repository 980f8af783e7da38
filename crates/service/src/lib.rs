pub mod api;
pub mod error;
pub mod types;

pub use api::JobServiceApi;
pub use error::{ApiError, ApiResult};
pub use types::*;
