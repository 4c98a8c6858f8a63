//! # bastion-core
//!
//! The session-scoped capability store for BASTION.
//!
//! This crate provides:
//! - The collaborator traits (`ProfileSource`, `CapabilityCheck`, `Router`)
//! - The `CapabilityStore` that loads the actor's grants once per session and
//!   answers membership checks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bastion_core::{CapabilityStore, traits::ProfileSource};
//!
//! let mut store = CapabilityStore::new();
//! store.initialize_from(&backend)?;
//! if store.has_capability(&SALE_CONTRACT_CREATE)? { /* ... */ }
//! ```

pub mod store;
pub mod traits;

pub use store::{CapabilityStore, Session, SessionId};

// ── Tests ─────────────────────────────────────────────────────────────────────
