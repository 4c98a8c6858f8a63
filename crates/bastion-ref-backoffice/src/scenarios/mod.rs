//! Back-office reference scenarios.
//!
//! Each scenario is a self-contained module that wires up the real BASTION
//! components (capability store, role-based menu, guards) with mock profiles
//! and demonstrates one access-control pattern.

pub mod contract_page;
pub mod menu_visibility;
pub mod session_lifecycle;
