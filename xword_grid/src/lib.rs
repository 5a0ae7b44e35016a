#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod engine;
pub mod error;
pub mod placed_word;
pub mod shared;
