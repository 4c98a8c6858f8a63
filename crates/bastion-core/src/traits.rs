//! Trait definitions at the boundaries of the access-control core.
//!
//! - `ProfileSource`   — the authentication collaborator (supplies the actor)
//! - `CapabilityCheck` — anything that can answer "is one of these granted"
//! - `Router`          — the routing collaborator used by the denied page
//!
//! The store, the menu filter, and the guards only ever talk to these traits,
//! so each can be swapped per test case.

use bastion_contracts::{
    capability::{CapabilitySet, CapabilityToken},
    error::BastionResult,
    profile::ActorProfile,
};

/// Supplies the signed-in actor's roles and permission records.
///
/// Called once per session by `CapabilityStore::initialize_from`.
pub trait ProfileSource {
    fn fetch_profile(&self) -> BastionResult<ActorProfile>;
}

/// A membership test over granted capabilities.
pub trait CapabilityCheck {
    /// Return true if at least one of `tokens` is granted.
    ///
    /// An empty slice is never satisfied. Implementations backed by session
    /// state return `NotInitialized` when no session exists.
    fn check_any(&self, tokens: &[CapabilityToken]) -> BastionResult<bool>;
}

impl CapabilityCheck for CapabilitySet {
    fn check_any(&self, tokens: &[CapabilityToken]) -> BastionResult<bool> {
        Ok(self.has_any(tokens))
    }
}

/// Navigation primitives offered by the routing layer.
pub trait Router {
    /// Navigate to the application's home route.
    fn navigate_home(&mut self);

    /// Navigate to the immediately preceding history entry.
    fn navigate_back(&mut self);
}
