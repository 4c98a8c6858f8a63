//! Capability tokens and granted capability sets.
//!
//! BASTION uses a capability model: an actor may see a menu entry, press an
//! action button, or open a page only if it holds one of the capabilities
//! gating it. A capability is the pair of a [`Screen`] and an [`Action`],
//! rendered as `"<SCREEN>_<ACTION>"`. Both halves are closed enumerations, so
//! every token the runtime handles is statically known.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::BastionError;

/// A functional area of the back-office application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Screen {
    Dashboard,
    SaleContract,
    PurchaseContract,
    LogisticsSchedule,
    Shipment,
    MasterDataForwarder,
    MasterDataSupplier,
    MasterDataCustomer,
    MasterDataPort,
    MasterDataProduct,
    CostSheet,
    CostReport,
    User,
    Role,
}

impl Screen {
    /// Every screen, in menu order.
    pub const ALL: [Screen; 14] = [
        Screen::Dashboard,
        Screen::SaleContract,
        Screen::PurchaseContract,
        Screen::LogisticsSchedule,
        Screen::Shipment,
        Screen::MasterDataForwarder,
        Screen::MasterDataSupplier,
        Screen::MasterDataCustomer,
        Screen::MasterDataPort,
        Screen::MasterDataProduct,
        Screen::CostSheet,
        Screen::CostReport,
        Screen::User,
        Screen::Role,
    ];

    /// The stable code used as the left half of a token string.
    pub fn code(self) -> &'static str {
        match self {
            Screen::Dashboard => "DASHBOARD",
            Screen::SaleContract => "SALE_CONTRACT",
            Screen::PurchaseContract => "PURCHASE_CONTRACT",
            Screen::LogisticsSchedule => "LOGISTICS_SCHEDULE",
            Screen::Shipment => "SHIPMENT",
            Screen::MasterDataForwarder => "MASTER_DATA_FORWARDER",
            Screen::MasterDataSupplier => "MASTER_DATA_SUPPLIER",
            Screen::MasterDataCustomer => "MASTER_DATA_CUSTOMER",
            Screen::MasterDataPort => "MASTER_DATA_PORT",
            Screen::MasterDataProduct => "MASTER_DATA_PRODUCT",
            Screen::CostSheet => "COST_SHEET",
            Screen::CostReport => "COST_REPORT",
            Screen::User => "USER",
            Screen::Role => "ROLE",
        }
    }

    /// Look up a screen by its code. Case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// A verb that can be performed on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Create,
    Update,
    View,
    Delete,
    Approve,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Update,
        Action::View,
        Action::Delete,
        Action::Approve,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::View => "VIEW",
            Action::Delete => "DELETE",
            Action::Approve => "APPROVE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

/// One grantable (screen, action) pair.
///
/// Tokens serialize as their string form (`"SALE_CONTRACT_VIEW"`) and only
/// deserialize through [`FromStr`], so an unrecognised string never becomes
/// a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityToken {
    pub screen: Screen,
    pub action: Action,
}

impl CapabilityToken {
    pub const fn new(screen: Screen, action: Action) -> Self {
        Self { screen, action }
    }

    /// Every token the application knows about.
    pub fn catalog() -> impl Iterator<Item = CapabilityToken> {
        Screen::ALL
            .into_iter()
            .flat_map(|screen| Action::ALL.into_iter().map(move |action| Self::new(screen, action)))
    }
}

impl fmt::Display for CapabilityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.screen.code(), self.action.code())
    }
}

impl FromStr for CapabilityToken {
    type Err = BastionError;

    /// Parse `"<SCREEN>_<ACTION>"`. Screen codes contain underscores and action
    /// codes never do, so the split happens at the last underscore.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || BastionError::UnknownCapability { token: s.to_string() };

        let (screen, action) = s.rsplit_once('_').ok_or_else(unknown)?;
        let screen = Screen::from_code(screen).ok_or_else(unknown)?;
        let action = Action::from_code(action).ok_or_else(unknown)?;
        Ok(Self { screen, action })
    }
}

impl TryFrom<String> for CapabilityToken {
    type Error = BastionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CapabilityToken> for String {
    fn from(token: CapabilityToken) -> Self {
        token.to_string()
    }
}

/// The set of capability tokens granted to the current actor.
///
/// Built once per session from the actor's permission records and never
/// mutated afterwards by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    inner: HashSet<CapabilityToken>,
}

impl CapabilitySet {
    /// Grant a capability to this set.
    pub fn grant(&mut self, token: CapabilityToken) {
        self.inner.insert(token);
    }

    /// Return true if the set contains the given token.
    pub fn has(&self, token: &CapabilityToken) -> bool {
        self.inner.contains(token)
    }

    /// Return true if the set contains at least one of `tokens`.
    ///
    /// An empty query is never satisfied.
    pub fn has_any(&self, tokens: &[CapabilityToken]) -> bool {
        tokens.iter().any(|t| self.inner.contains(t))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Return an iterator over all granted tokens.
    pub fn all(&self) -> impl Iterator<Item = &CapabilityToken> {
        self.inner.iter()
    }
}

impl FromIterator<CapabilityToken> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityToken>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}

/// Anything that can be asked "is at least one of these tokens granted".
///
/// Implemented for a single token and for ordered lists of tokens, so callers
/// can pass either shape to `has_capability`.
pub trait TokenQuery {
    fn tokens(&self) -> &[CapabilityToken];
}

impl TokenQuery for CapabilityToken {
    fn tokens(&self) -> &[CapabilityToken] {
        std::slice::from_ref(self)
    }
}

impl TokenQuery for [CapabilityToken] {
    fn tokens(&self) -> &[CapabilityToken] {
        self
    }
}

impl<const N: usize> TokenQuery for [CapabilityToken; N] {
    fn tokens(&self) -> &[CapabilityToken] {
        self
    }
}

impl TokenQuery for Vec<CapabilityToken> {
    fn tokens(&self) -> &[CapabilityToken] {
        self
    }
}
