//! Actor profile types supplied by the authentication collaborator.
//!
//! The backend returns the actor's roles and a flattened list of permission
//! records at login. The runtime reduces those records to a
//! [`CapabilitySet`] exactly once per session.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    capability::{CapabilitySet, CapabilityToken},
    error::{BastionError, BastionResult},
};

/// A role assigned to the actor (e.g. `"SALES_CLERK"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    /// Stable role code.
    pub code: String,
    /// Display name, when the backend provides one.
    #[serde(default)]
    pub name: Option<String>,
}

impl RoleDescriptor {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), name: None }
    }
}

/// A single permission record as the backend reports it.
///
/// `code` is expected to be a capability token string, but it is untrusted
/// until parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub code: String,
}

impl PermissionRecord {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The actor record loaded at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub username: String,
    /// Roles in the order the backend returned them.
    #[serde(default)]
    pub roles: Vec<RoleDescriptor>,
    /// Permission records flattened across all roles.
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

impl ActorProfile {
    /// Parse a profile from the backend's JSON body.
    ///
    /// Returns `BastionError::ConfigError` if the document is not valid JSON
    /// or does not match the profile shape.
    pub fn from_json_str(s: &str) -> BastionResult<Self> {
        serde_json::from_str(s).map_err(|e| BastionError::ConfigError {
            reason: format!("failed to parse actor profile JSON: {}", e),
        })
    }

    /// Reduce the permission records to a capability set.
    ///
    /// Records that do not name a known token are skipped and logged; they
    /// never grant anything.
    pub fn capability_set(&self) -> CapabilitySet {
        self.permissions
            .iter()
            .filter_map(|record| match record.code.parse::<CapabilityToken>() {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(
                        username = %self.username,
                        code = %record.code,
                        error = %e,
                        "ignoring unrecognised permission record"
                    );
                    None
                }
            })
            .collect()
    }
}
