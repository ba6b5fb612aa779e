#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
mod error;
mod hooks;
mod lifecycle;
mod pool;
mod pooled;

pub use error::*;
pub use hooks::*;
pub use lifecycle::*;
pub use pool::*;
pub use pooled::*;
