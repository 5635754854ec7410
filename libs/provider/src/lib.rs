//! Client-side collaborators for the scaling service control plane.
//!
//! [`ApiClient`] speaks the JSON API, [`GroupDirectory`] discovers scaling
//! groups by tag, and [`CapacityApplier`] submits the capacity updates a
//! plan produced. Planning itself lives in `fleetcap-planner` and never
//! touches the network.

pub mod apply;
pub mod client;
pub mod directory;
pub mod error;
pub mod idempotency;
pub mod types;

pub use apply::{ApplyError, ApplyReport, CapacityApplier};
pub use client::ApiClient;
pub use directory::{GroupDirectory, GroupFilter, TagFilter};
pub use error::ProviderError;
pub use types::{ListScalingGroupsResponse, ScalingGroupResource, UpdateCapacityRequest};
