//! Idempotency key helpers.
//!
//! The scaling service supports `Idempotency-Key` for write endpoints. Keys
//! are derived deterministically from the request so retrying the same
//! capacity update is safe.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ProviderError;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

pub fn default_idempotency_key(
    endpoint_name: &str,
    request_scope: &str,
    body: &impl Serialize,
) -> Result<String, ProviderError> {
    // Canonicalize JSON so map key ordering doesn't affect the derived key.
    let json_value = serde_json::to_value(body)?;
    let body_json = serde_json::to_vec(&json_value)?;

    let mut hasher = Sha256::new();
    hasher.update(endpoint_name.as_bytes());
    hasher.update(b"\n");
    hasher.update(request_scope.as_bytes());
    hasher.update(b"\n");
    hasher.update(&body_json);

    Ok(format!("fc_{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::UpdateCapacityRequest;

    #[test]
    fn key_is_stable_for_identical_requests() {
        let req = UpdateCapacityRequest {
            desired_capacity: Some(4),
            min_size: None,
            max_size: None,
        };

        let scope = "/v1/regions/eu-west-1/scaling-groups/web-a/capacity";
        let a = default_idempotency_key("scaling-groups.update_capacity", scope, &req).unwrap();
        let b = default_idempotency_key("scaling-groups.update_capacity", scope, &req).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("fc_"));
        assert!(a.len() >= 8 && a.len() <= 128);
    }

    #[test]
    fn key_changes_when_body_changes() {
        let scope = "/v1/regions/eu-west-1/scaling-groups/web-a/capacity";
        let a = default_idempotency_key(
            "scaling-groups.update_capacity",
            scope,
            &UpdateCapacityRequest {
                desired_capacity: Some(4),
                min_size: None,
                max_size: None,
            },
        )
        .unwrap();
        let b = default_idempotency_key(
            "scaling-groups.update_capacity",
            scope,
            &UpdateCapacityRequest {
                desired_capacity: Some(5),
                min_size: None,
                max_size: None,
            },
        )
        .unwrap();
        assert_ne!(a, b);
    }
}
