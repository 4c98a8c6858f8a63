//! The role-based menu: a full navigation tree plus the filtered view for the
//! current session.
//!
//! The filtered tree is recomputed in full whenever the session or the
//! store's generation changes (login, logout, re-login, a different store)
//! and cached otherwise. Failures never reach the caller: an uninitialized
//! store or any other error produces the empty tree.

use tracing::{debug, error};

use bastion_contracts::nav::NavTree;
use bastion_core::{CapabilityStore, SessionId};

use crate::{definition::MenuDefinition, filter::filter_tree};

/// Identifies the grant set a cached tree was computed from.
///
/// Generations are counted per store, so the session id is part of the key.
/// Every uninitialized store filters to the empty tree, so `None` sessions
/// may share an entry.
type CacheKey = (Option<SessionId>, u64);

#[derive(Debug, Clone)]
pub struct RoleBasedMenu {
    full: NavTree,
    cached: Option<(CacheKey, NavTree)>,
}

impl RoleBasedMenu {
    pub fn new(full: NavTree) -> Self {
        Self { full, cached: None }
    }

    pub fn from_definition(definition: MenuDefinition) -> Self {
        Self::new(definition.into_tree())
    }

    /// The unfiltered tree.
    pub fn full(&self) -> &NavTree {
        &self.full
    }

    /// The tree the current actor may see.
    pub fn visible(&mut self, store: &CapabilityStore) -> &NavTree {
        let key: CacheKey = (store.session().ok().map(|s| s.id), store.generation());
        if self.cached.as_ref().map(|(k, _)| *k) != Some(key) {
            debug!(
                session_id = ?key.0.map(|id| id.0),
                generation = key.1,
                "recomputing visible menu"
            );
            self.cached = None;
        }

        let full = &self.full;
        let (_, tree) = self
            .cached
            .get_or_insert_with(|| (key, recompute(full, store)));
        tree
    }

    /// Return true if `url` belongs to an entry of the visible tree.
    pub fn can_navigate(&mut self, store: &CapabilityStore, url: &str) -> bool {
        self.visible(store).visible_urls().contains(&url)
    }
}

fn recompute(full: &NavTree, store: &CapabilityStore) -> NavTree {
    match store.granted() {
        Ok(granted) => filter_tree(full, granted),
        Err(e) => {
            error!(error = %e, "cannot filter navigation menu; showing empty menu");
            NavTree::default()
        }
    }
}
