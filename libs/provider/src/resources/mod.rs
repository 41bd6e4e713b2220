//! Resource types exposed by the provider.

mod dns;
mod id;

pub use dns::{new_dns_resource, DNS_PROFILE};
pub use id::{new_id_resource, ID_PROFILE};

use crate::Resource;

/// Constructs a fresh, unconfigured resource.
pub type ResourceFactory = fn() -> Box<dyn Resource>;

/// Every resource the provider registers.
pub const RESOURCES: &[ResourceFactory] = &[new_id_resource, new_dns_resource];
