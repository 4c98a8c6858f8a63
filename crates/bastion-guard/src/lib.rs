//! # bastion-guard
//!
//! Fragment and page guards for BASTION.
//!
//! A [`FragmentGuard`] omits a small piece of output (an action button) when
//! the actor lacks the required capability. A [`PageGuard`] replaces a whole
//! page with an [`AccessDeniedView`] that offers a way home or back.
//!
//! ```rust,ignore
//! use bastion_guard::{FragmentGuard, PageGuard, Requirement};
//!
//! let create = FragmentGuard::new(Requirement::one(SALE_CONTRACT_CREATE))
//!     .render(&store, || Button::new("New contract"));
//!
//! let page = PageGuard::new(Requirement::one(SALE_CONTRACT_VIEW))
//!     .render(&store, || SaleContractPage::load(&api));
//! ```

pub mod guard;

pub use guard::{
    AccessDeniedView, FragmentGuard, GuardState, PageGuard, PageOutcome, RecoveryAction, Requirement,
};

// ── Tests ─────────────────────────────────────────────────────────────────────
