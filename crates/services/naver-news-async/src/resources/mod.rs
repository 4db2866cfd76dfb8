//! API resource implementations for the Naver client

/// News search API resource
pub mod news;

pub use news::News;
