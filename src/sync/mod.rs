//! Shared maps and wait groups.

mod map;
mod wait;

pub use map::SyncMap;
pub use wait::{WaitGroup, wait_timeout, wait_until};
