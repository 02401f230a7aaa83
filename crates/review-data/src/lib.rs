//! Review-summary data access.
//!
//! This crate provides:
//! - `HttpSession` - Shared, host-owned HTTP session abstraction
//! - `ReqwestSession` - Pooled `reqwest` implementation of `HttpSession`
//! - `ReviewFetcher` - One GET per review filter, failures logged and dropped
//! - `RawReviewResponse` / `FetchedReviews` - Decoded endpoint payloads

mod error;
mod fetcher;
mod raw;
mod response;
mod session;
mod timeout;

pub use error::*;
pub use fetcher::*;
pub use raw::*;
pub use response::*;
pub use session::*;
pub use timeout::*;
