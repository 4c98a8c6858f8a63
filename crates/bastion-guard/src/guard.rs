//! Presentation-boundary guards.
//!
//! Both guards evaluate a [`Requirement`] to a [`GuardState`] synchronously on
//! every render, then either run the wrapped render closure or do not. A
//! denied guard never invokes the closure, so nothing the protected view
//! would do on construction (data fetches included) happens.
//!
//!   Requirement → GuardState::evaluate → Permitted → render()
//!                                      → Denied    → nothing / AccessDeniedView
//!
//! `GuardState::evaluate` propagates `NotInitialized`. The guards themselves
//! log it and fall back to `Denied`.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use bastion_contracts::{capability::CapabilityToken, error::BastionResult};
use bastion_core::traits::{CapabilityCheck, Router};

/// The tokens a guarded view asks for. Holding any one of them is enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The primary token, if any.
    #[serde(default)]
    pub permission: Option<CapabilityToken>,
    /// Additional alternatives.
    #[serde(default)]
    pub any_of: Vec<CapabilityToken>,
}

impl Requirement {
    /// Require a single token.
    pub fn one(token: CapabilityToken) -> Self {
        Self { permission: Some(token), any_of: Vec::new() }
    }

    /// Require any of `tokens`.
    pub fn any_of(tokens: impl IntoIterator<Item = CapabilityToken>) -> Self {
        Self { permission: None, any_of: tokens.into_iter().collect() }
    }

    /// Add alternatives to this requirement.
    pub fn or(mut self, tokens: impl IntoIterator<Item = CapabilityToken>) -> Self {
        self.any_of.extend(tokens);
        self
    }

    /// The primary token followed by the alternatives, without repeats.
    pub fn union(&self) -> Vec<CapabilityToken> {
        let mut out: Vec<CapabilityToken> = Vec::with_capacity(self.any_of.len() + 1);
        for token in self.permission.iter().chain(self.any_of.iter()) {
            if !out.contains(token) {
                out.push(*token);
            }
        }
        out
    }
}

/// The two states a guard can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardState {
    Permitted,
    Denied,
}

impl GuardState {
    /// Evaluate `requirement` against `check`.
    ///
    /// An empty requirement is `Denied`.
    pub fn evaluate(check: &dyn CapabilityCheck, requirement: &Requirement) -> BastionResult<Self> {
        let tokens = requirement.union();
        let state = if check.check_any(&tokens)? {
            GuardState::Permitted
        } else {
            GuardState::Denied
        };
        debug!(
            tokens = ?tokens.iter().map(CapabilityToken::to_string).collect::<Vec<_>>(),
            state = ?state,
            "guard evaluated"
        );
        Ok(state)
    }

    /// Like `evaluate`, but any error becomes `Denied`.
    fn evaluate_or_deny(check: &dyn CapabilityCheck, requirement: &Requirement, guard: &str) -> Self {
        Self::evaluate(check, requirement).unwrap_or_else(|e| {
            error!(guard, error = %e, "guard evaluation failed; denying");
            GuardState::Denied
        })
    }
}

/// Gates a small fragment such as an action button.
///
/// A denied fragment is omitted entirely: no placeholder, no disabled state.
#[derive(Debug, Clone)]
pub struct FragmentGuard {
    requirement: Requirement,
}

impl FragmentGuard {
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    /// Return `Some(render())` if permitted, `None` otherwise.
    pub fn render<T>(&self, check: &dyn CapabilityCheck, render: impl FnOnce() -> T) -> Option<T> {
        match GuardState::evaluate_or_deny(check, &self.requirement, "fragment") {
            GuardState::Permitted => Some(render()),
            GuardState::Denied => None,
        }
    }
}

/// A recovery option offered on the access-denied page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryAction {
    /// Go to the application's home route.
    Home,
    /// Go to the previous history entry.
    Back,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::Home => "Go to home page",
            RecoveryAction::Back => "Go back",
        }
    }
}

/// The fallback rendered in place of a page the actor may not open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDeniedView {
    pub title: String,
    pub message: String,
    pub actions: [RecoveryAction; 2],
}

impl Default for AccessDeniedView {
    fn default() -> Self {
        Self {
            title: "Access denied".to_string(),
            message: "You do not have permission to view this page.".to_string(),
            actions: [RecoveryAction::Home, RecoveryAction::Back],
        }
    }
}

impl AccessDeniedView {
    /// Carry out a recovery action through the routing layer.
    pub fn perform(&self, action: RecoveryAction, router: &mut dyn Router) {
        debug!(action = ?action, "access denied recovery");
        match action {
            RecoveryAction::Home => router.navigate_home(),
            RecoveryAction::Back => router.navigate_back(),
        }
    }
}

/// What a `PageGuard` renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<P> {
    /// The protected page, rendered unchanged.
    Page(P),
    /// The fallback; the protected page was never constructed.
    Denied(AccessDeniedView),
}

impl<P> PageOutcome<P> {
    pub fn is_denied(&self) -> bool {
        matches!(self, PageOutcome::Denied(_))
    }
}

/// Gates a full routed page.
#[derive(Debug, Clone)]
pub struct PageGuard {
    requirement: Requirement,
    denied: AccessDeniedView,
}

impl PageGuard {
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement, denied: AccessDeniedView::default() }
    }

    /// Replace the default fallback view.
    pub fn with_denied_view(mut self, view: AccessDeniedView) -> Self {
        self.denied = view;
        self
    }

    /// Render the page if permitted, the access-denied view otherwise.
    pub fn render<P>(&self, check: &dyn CapabilityCheck, page: impl FnOnce() -> P) -> PageOutcome<P> {
        match GuardState::evaluate_or_deny(check, &self.requirement, "page") {
            GuardState::Permitted => PageOutcome::Page(page()),
            GuardState::Denied => PageOutcome::Denied(self.denied.clone()),
        }
    }
}
