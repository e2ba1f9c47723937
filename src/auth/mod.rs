pub mod middleware;
pub mod token;

pub use middleware::{device_cookie, AuthenticatedDevice, DEVICE_COOKIE};
pub use token::{generate_device_token, verify_device_token};
