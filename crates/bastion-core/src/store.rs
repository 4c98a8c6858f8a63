//! The capability store: the actor's granted capabilities for one session.
//!
//! The store has an explicit lifecycle:
//!
//!   Uninitialized → initialize / initialize_from → Ready → clear → Uninitialized
//!
//! While uninitialized, every accessor returns `BastionError::NotInitialized`
//! instead of an empty answer. While ready, the granted set never changes;
//! the only way to change it is to `clear` and initialize again, which bumps
//! `generation()` so derived views know to recompute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bastion_contracts::{
    capability::{CapabilitySet, CapabilityToken, TokenQuery},
    error::{BastionError, BastionResult},
    profile::{ActorProfile, RoleDescriptor},
};

use crate::traits::{CapabilityCheck, ProfileSource};

/// Unique identifier for one signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the store knows about the signed-in actor.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub username: String,
    /// Role descriptors in backend order.
    pub roles: Vec<RoleDescriptor>,
    /// Capability tokens derived from the profile's permission records.
    pub granted: CapabilitySet,
    /// Wall-clock time the profile was loaded (UTC).
    pub loaded_at: DateTime<Utc>,
}

impl Session {
    fn from_profile(profile: ActorProfile) -> Self {
        let granted = profile.capability_set();
        Self {
            id: SessionId::new(),
            username: profile.username,
            roles: profile.roles,
            granted,
            loaded_at: Utc::now(),
        }
    }

    /// A session for an actor whose profile could not be loaded.
    fn unauthenticated() -> Self {
        Self {
            id: SessionId::new(),
            username: String::new(),
            roles: Vec::new(),
            granted: CapabilitySet::default(),
            loaded_at: Utc::now(),
        }
    }
}

/// Holds the current session, if any.
///
/// Pass the store by reference to whatever needs it; there is no global
/// instance.
#[derive(Debug, Default)]
pub struct CapabilityStore {
    session: Option<Session>,
    generation: u64,
}

impl CapabilityStore {
    /// Create an uninitialized store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the store from an already-fetched profile.
    ///
    /// Returns `AlreadyInitialized` if a session is active; call `clear` first.
    pub fn initialize(&mut self, profile: ActorProfile) -> BastionResult<&Session> {
        if let Some(active) = &self.session {
            return Err(BastionError::AlreadyInitialized {
                session_id: active.id.0.to_string(),
            });
        }
        Ok(self.install(Session::from_profile(profile)))
    }

    /// Fetch the profile from `source` and populate the store.
    ///
    /// A fetch failure does not leave the store uninitialized: the actor is
    /// treated as unauthenticated and receives an empty capability set, which
    /// keeps every gated menu entry and page hidden.
    pub fn initialize_from(&mut self, source: &dyn ProfileSource) -> BastionResult<&Session> {
        if let Some(active) = &self.session {
            return Err(BastionError::AlreadyInitialized {
                session_id: active.id.0.to_string(),
            });
        }

        let session = match source.fetch_profile() {
            Ok(profile) => Session::from_profile(profile),
            Err(e) => {
                warn!(error = %e, "profile fetch failed; treating actor as unauthenticated");
                Session::unauthenticated()
            }
        };
        Ok(self.install(session))
    }

    fn install(&mut self, session: Session) -> &Session {
        self.generation += 1;
        info!(
            session_id = %session.id.0,
            username = %session.username,
            roles = session.roles.len(),
            capabilities = session.granted.len(),
            generation = self.generation,
            "capability store initialized"
        );
        self.session.insert(session)
    }

    /// Drop the session (logout).
    pub fn clear(&mut self) {
        if let Some(session) = self.session.take() {
            self.generation += 1;
            info!(
                session_id = %session.id.0,
                generation = self.generation,
                "capability store cleared"
            );
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Counter bumped whenever the granted set is replaced or cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The active session.
    pub fn session(&self) -> BastionResult<&Session> {
        self.require("session")
    }

    /// Role descriptors assigned to the actor.
    pub fn roles(&self) -> BastionResult<&[RoleDescriptor]> {
        Ok(&self.require("roles")?.roles)
    }

    /// The flattened set of granted tokens.
    pub fn granted(&self) -> BastionResult<&CapabilitySet> {
        Ok(&self.require("granted")?.granted)
    }

    /// Return true if at least one of `tokens` is granted.
    ///
    /// Accepts a single token or a list. An empty list returns `Ok(false)`.
    pub fn has_capability<Q: TokenQuery + ?Sized>(&self, tokens: &Q) -> BastionResult<bool> {
        let session = self.require("has_capability")?;
        let tokens = tokens.tokens();
        let granted = session.granted.has_any(tokens);
        debug!(
            tokens = ?tokens.iter().map(CapabilityToken::to_string).collect::<Vec<_>>(),
            granted,
            "capability check"
        );
        Ok(granted)
    }

    /// Return true if the actor holds a role with `code`.
    pub fn has_role(&self, code: &str) -> BastionResult<bool> {
        Ok(self.require("has_role")?.roles.iter().any(|r| r.code == code))
    }

    fn require(&self, operation: &str) -> BastionResult<&Session> {
        self.session.as_ref().ok_or_else(|| BastionError::NotInitialized {
            operation: operation.to_string(),
        })
    }
}

impl CapabilityCheck for CapabilityStore {
    fn check_any(&self, tokens: &[CapabilityToken]) -> BastionResult<bool> {
        self.has_capability(tokens)
    }
}
