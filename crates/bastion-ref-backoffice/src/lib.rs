//! # bastion-ref-backoffice
//!
//! Back-office reference pack for the BASTION access-control core.
//!
//! Bundles the application's static navigation menu, a handful of mock actor
//! profiles, and three scenarios:
//!
//! 1. **Menu visibility** — the filtered menu each bundled profile sees.
//! 2. **Contract page** — a guarded page with guarded toolbar actions.
//! 3. **Session lifecycle** — login, logout, and a failed profile fetch.
//!
//! All data is hardcoded and fictional. No external calls are made.

use bastion_contracts::{
    error::BastionResult,
    nav::{NavNode, NavTree, NodeKind},
};
use bastion_core::CapabilityStore;
use bastion_menu::{MenuDefinition, RoleBasedMenu};

pub mod mock_data;
pub mod scenarios;

/// The back-office navigation menu, as shipped with the application.
pub const BACKOFFICE_MENU: &str = include_str!("../menus/backoffice.toml");

/// Parse the bundled menu into a typed tree.
pub fn backoffice_menu() -> BastionResult<NavTree> {
    Ok(MenuDefinition::from_toml_str(BACKOFFICE_MENU)?.into_tree())
}

/// Sign in as a bundled profile and return the store and its menu.
pub fn sign_in(profile: &str) -> BastionResult<(CapabilityStore, RoleBasedMenu)> {
    let mut store = CapabilityStore::new();
    store.initialize(mock_data::profile(profile)?)?;
    Ok((store, RoleBasedMenu::new(backoffice_menu()?)))
}

/// Render a tree as an indented outline, one node per line.
///
/// Hidden entries are marked rather than omitted so the outline shows every
/// route the actor can reach. Children of leaf entries are never checked by
/// the filter, so they are not rendered.
pub fn render_tree(tree: &NavTree) -> String {
    fn walk(nodes: &[NavNode], depth: usize, out: &mut String) {
        for node in nodes {
            let marker = match node.kind {
                NodeKind::Group => "#",
                NodeKind::Collapse => "+",
                NodeKind::Item => "-",
                NodeKind::Hidden => "~",
            };
            out.push_str(&format!("{:indent$}{} {}", "", marker, node.title, indent = depth * 2));
            if let Some(url) = &node.url {
                out.push_str(&format!("  ({})", url));
            }
            out.push('\n');
            if let Some(children) = node.menu_children() {
                walk(children, depth + 1, out);
            }
        }
    }

    if tree.is_empty() {
        return "(no entries)\n".to_string();
    }
    let mut out = String::new();
    walk(&tree.items, 0, &mut out);
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
