//! Core data types for the expense notifier.

pub mod money;
pub mod summary;
pub mod transaction;
pub mod window;

pub use money::*;
pub use summary::*;
pub use transaction::*;
pub use window::*;
