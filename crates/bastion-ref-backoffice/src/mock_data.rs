//! Simulated actor profiles for the back-office reference pack.
//!
//! All data in this module is hardcoded and fictional. The profiles are
//! written as the JSON bodies a backend would return at login and go through
//! the same parser a real session would.

use serde_json::{json, Value};

use bastion_contracts::{
    capability::CapabilityToken,
    error::{BastionError, BastionResult},
    profile::ActorProfile,
};
use bastion_core::traits::ProfileSource;

/// Names of the bundled profiles, in display order.
pub const PROFILE_NAMES: [&str; 5] = ["admin", "sales", "logistics", "accountant", "guest"];

fn profile_json(name: &str) -> Option<Value> {
    let body = match name {
        "admin" => {
            let all: Vec<Value> = CapabilityToken::catalog()
                .map(|t| json!({ "code": t.to_string() }))
                .collect();
            json!({
                "username": "admin",
                "roles": [{ "code": "ADMIN", "name": "Administrator" }],
                "permissions": all
            })
        }
        "sales" => json!({
            "username": "linh.sales",
            "roles": [{ "code": "SALES_CLERK", "name": "Sales clerk" }],
            "permissions": [
                { "code": "SALE_CONTRACT_VIEW" },
                { "code": "SALE_CONTRACT_CREATE" },
                { "code": "SALE_CONTRACT_UPDATE" },
                { "code": "MASTER_DATA_CUSTOMER_VIEW" }
            ]
        }),
        "logistics" => json!({
            "username": "tuan.logistics",
            "roles": [{ "code": "LOGISTICS_COORDINATOR" }],
            "permissions": [
                { "code": "LOGISTICS_SCHEDULE_VIEW" },
                { "code": "LOGISTICS_SCHEDULE_UPDATE" },
                { "code": "SHIPMENT_VIEW" },
                { "code": "MASTER_DATA_FORWARDER_VIEW" },
                { "code": "MASTER_DATA_PORT_VIEW" }
            ]
        }),
        "accountant" => json!({
            "username": "ha.accounting",
            "roles": [{ "code": "ACCOUNTANT" }, { "code": "VIEWER" }],
            "permissions": [
                { "code": "COST_SHEET_VIEW" },
                { "code": "COST_SHEET_APPROVE" },
                { "code": "COST_REPORT_VIEW" },
                { "code": "SALE_CONTRACT_VIEW" },
                { "code": "LEGACY_LEDGER_VIEW" }
            ]
        }),
        "guest" => json!({
            "username": "guest",
            "roles": [],
            "permissions": []
        }),
        _ => return None,
    };
    Some(body)
}

/// Look up a bundled profile by name.
pub fn profile(name: &str) -> BastionResult<ActorProfile> {
    let body = profile_json(name).ok_or_else(|| BastionError::ProfileUnavailable {
        reason: format!("no bundled profile named '{}'", name),
    })?;
    ActorProfile::from_json_str(&body.to_string())
}

/// A stand-in for the authentication backend.
///
/// Serves one bundled profile, or fails every fetch when `offline`.
#[derive(Debug, Clone)]
pub struct MockBackend {
    profile: String,
    offline: bool,
}

impl MockBackend {
    pub fn new(profile: impl Into<String>) -> Self {
        Self { profile: profile.into(), offline: false }
    }

    pub fn offline() -> Self {
        Self { profile: String::new(), offline: true }
    }
}

impl ProfileSource for MockBackend {
    fn fetch_profile(&self) -> BastionResult<ActorProfile> {
        if self.offline {
            return Err(BastionError::ProfileUnavailable {
                reason: "backend unreachable".to_string(),
            });
        }
        profile(&self.profile)
    }
}
