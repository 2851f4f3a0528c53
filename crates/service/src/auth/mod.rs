//! Session handling: login/register against the backend, token persistence
//! and logout navigation.

pub mod navigator;
pub mod service;

pub use navigator::{Navigator, TracingNavigator, LOGIN_ROUTE};
pub use service::AuthService;
