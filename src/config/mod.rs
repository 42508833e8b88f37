//! Configuration for samcheck.
//!
//! Only one configuration layer exists: the user-wide [`GlobalConfig`] file.
//! CLI flags and environment variables take precedence over it; see
//! [`crate::cli`] for the resolution order.

mod global;

pub use global::{GlobalConfig, PricingRates};
