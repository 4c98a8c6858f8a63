//! Capability-driven navigation tree filtering.
//!
//! Algorithm (depth-first, pre-order, never mutates the input):
//!
//! 1. An empty granted set yields an empty tree.
//! 2. For each node, in order:
//!    a. `should_show`: a node with an id needs at least one of its listed
//!       permissions; an empty list never qualifies. A node without an id is
//!       shown only if its title contains `DASHBOARD_MARKER`.
//!    b. A group or collapse node with a children array keeps itself iff at
//!       least one child survives, whatever its own `should_show`. One with no
//!       children array falls back to `should_show`.
//!    c. Any other node survives iff `should_show`.
//! 3. Sibling ids are not de-duplicated.

use tracing::debug;

use bastion_contracts::{
    capability::CapabilitySet,
    nav::{NavNode, NavTree},
};

/// Case-sensitive title marker for landing entries that carry no id.
pub const DASHBOARD_MARKER: &str = "dashboard";

/// Produce the subset of `tree` visible to an actor holding `granted`.
pub fn filter_tree(tree: &NavTree, granted: &CapabilitySet) -> NavTree {
    if granted.is_empty() {
        debug!("no capabilities granted; navigation tree is empty");
        return NavTree::default();
    }

    let items = filter_nodes(&tree.items, granted);
    debug!(
        top_level_in = tree.items.len(),
        top_level_out = items.len(),
        granted = granted.len(),
        "navigation tree filtered"
    );
    NavTree::new(items)
}

fn filter_nodes(nodes: &[NavNode], granted: &CapabilitySet) -> Vec<NavNode> {
    nodes.iter().filter_map(|node| filter_node(node, granted)).collect()
}

fn filter_node(node: &NavNode, granted: &CapabilitySet) -> Option<NavNode> {
    if node.kind.is_container() {
        if let Some(children) = &node.children {
            let kept = filter_nodes(children, granted);
            if kept.is_empty() {
                return None;
            }
            return Some(NavNode {
                id: node.id.clone(),
                title: node.title.clone(),
                kind: node.kind,
                url: node.url.clone(),
                icon: node.icon.clone(),
                children: Some(kept),
                permissions: node.permissions.clone(),
            });
        }
    }

    should_show(node, granted).then(|| node.clone())
}

/// The node's own permission check, ignoring its children.
pub fn should_show(node: &NavNode, granted: &CapabilitySet) -> bool {
    match &node.id {
        Some(_) => granted.has_any(&node.permissions),
        None => node.title.contains(DASHBOARD_MARKER),
    }
}
