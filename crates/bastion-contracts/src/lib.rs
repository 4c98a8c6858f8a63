//! # bastion-contracts
//!
//! Shared types for the BASTION access-control core: capability tokens,
//! actor profiles, navigation trees, and the error type.
//!
//! All crates in the workspace import from here. No filtering or session
//! logic lives in this crate, only data definitions and their parsers.

pub mod capability;
pub mod error;
pub mod nav;
pub mod profile;
