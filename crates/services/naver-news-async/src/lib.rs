//! Async Naver news search client with a retry-wrapped GET used for both the
//! search API and arbitrary publisher pages.

/// HTTP client implementation
pub mod client;
/// Configuration and credentials
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry policy
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::{Client, FetchedPage};
pub use crate::config::NaverConfig;
pub use crate::error::NaverError;
pub use crate::retry::RetryPolicy;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, NaverConfig, NaverError, RetryPolicy};
}
