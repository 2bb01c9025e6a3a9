//! HTTP client module
//!
//! Thin transport layer under the fetch gateway.
//!
//! # Features
//!
//! - **Single attempt**: no retries, failures are classified and returned
//! - **Timeout**: optional per-client request timeout
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Default headers** and user agent on every request

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
