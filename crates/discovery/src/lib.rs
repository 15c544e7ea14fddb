//! Service-registry client for the catalog service.
//!
//! Registers this process under its logical name at startup, withdraws it at
//! shutdown, and resolves sibling services (SSO, SEO, banners) to addresses
//! for outbound calls.

pub mod client;
pub mod error;
pub mod resolver;

pub use client::DiscoveryClient;
pub use error::DiscoveryError;
pub use resolver::{ServiceResolver, StaticResolver};
