pub mod auth;
pub mod guest;
pub mod response;

pub use auth::{jwt_auth_middleware, Principal};
pub use guest::guest_access_middleware;
pub use response::{ApiResponse, ApiResult};
