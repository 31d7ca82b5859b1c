//! Banking API access for the expense notifier.
//!
//! - `client` - Monobank personal API client
//! - `source` - traits the service depends on, so tests can swap in fakes

pub mod client;
pub mod error;
pub mod source;

pub use client::*;
pub use error::*;
pub use source::*;
