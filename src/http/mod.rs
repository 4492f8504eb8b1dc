//! HTTP helpers: header builders, request body dumps and simple downloads.

mod dump;
mod fetch;
pub mod header;

pub use dump::{dump_body, is_chunked};
pub use fetch::{FetchConfig, Fetcher, fetch, save};
