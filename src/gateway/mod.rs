//! Fetch gateway module
//!
//! Performs a single remote page retrieval and validates the response.
//!
//! # Overview
//!
//! - `FetchGateway` - async trait the pagination layer fetches through
//! - `HttpGateway` - implementation over the HTTP client
//! - `CollectionResponse` - the wire shape, checked before becoming a `Page`

mod http;
mod types;

pub use http::HttpGateway;
pub use types::{parse_page, CollectionResponse, FetchGateway, WireItem};
