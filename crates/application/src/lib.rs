//! rdns Application Layer
pub mod ports;
pub mod services;

pub use services::{default_concurrency, LookupHandle, ReverseLookupBuilder, ReverseLookupService};
