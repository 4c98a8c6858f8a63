//! Static menu definitions and their conversion to typed navigation trees.
//!
//! A `MenuDefinition` is deserialized from TOML and holds raw nodes whose
//! `type` and `permissions` are still plain strings. `into_tree` parses them
//! into `NavNode`s. A node that fails to parse is dropped together with its
//! subtree; its siblings and ancestors are unaffected.
//!
//! Example:
//! ```toml
//! [[items]]
//! id = "contracts"
//! title = "Contracts"
//! type = "group"
//!
//! [[items.children]]
//! id = "sale-contract"
//! title = "Sale contracts"
//! type = "item"
//! url = "/contracts/sale"
//! permissions = ["SALE_CONTRACT_VIEW"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bastion_contracts::{
    capability::CapabilityToken,
    error::{BastionError, BastionResult},
    nav::{NavNode, NavTree, NodeKind},
};

/// A navigation node as written in the menu file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNavNode {
    #[serde(default)]
    pub id: Option<String>,

    pub title: String,

    /// One of `group`, `item`, `hidden`, `collapse`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub children: Option<Vec<RawNavNode>>,

    /// Capability token strings gating this node.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RawNavNode {
    fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

/// The top-level structure deserialized from a TOML menu file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub items: Vec<RawNavNode>,
}

impl MenuDefinition {
    /// Parse `s` as a TOML menu definition.
    ///
    /// Returns `BastionError::ConfigError` if the TOML is malformed or does not
    /// match the `MenuDefinition` shape. Unknown kinds or tokens are not
    /// errors here; they are handled node by node in `into_tree`.
    pub fn from_toml_str(s: &str) -> BastionResult<Self> {
        toml::from_str(s).map_err(|e| BastionError::ConfigError {
            reason: format!("failed to parse menu TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as a TOML menu definition.
    pub fn from_file(path: &Path) -> BastionResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BastionError::ConfigError {
            reason: format!("failed to read menu file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Convert to a typed tree, dropping malformed nodes.
    pub fn into_tree(self) -> NavTree {
        let items = convert_nodes(self.items);
        debug!(top_level = items.len(), "menu definition loaded");
        NavTree::new(items)
    }
}

fn convert_nodes(raw: Vec<RawNavNode>) -> Vec<NavNode> {
    let mut nodes = Vec::with_capacity(raw.len());
    for node in raw {
        match convert_node(node) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!(error = %e, "dropping malformed navigation node and its subtree"),
        }
    }
    nodes
}

/// Parse one raw node. Children are converted independently, so a malformed
/// child only removes that child.
pub fn convert_node(raw: RawNavNode) -> BastionResult<NavNode> {
    let malformed = |reason: String| BastionError::MalformedNavigationNode {
        node: raw.label().to_string(),
        reason,
    };

    let kind = parse_kind(&raw.kind).ok_or_else(|| malformed(format!("unknown kind '{}'", raw.kind)))?;

    let permissions = raw
        .permissions
        .iter()
        .map(|p| p.parse::<CapabilityToken>())
        .collect::<BastionResult<Vec<_>>>()
        .map_err(|e| malformed(e.to_string()))?;

    Ok(NavNode {
        id: raw.id,
        title: raw.title,
        kind,
        url: raw.url,
        icon: raw.icon,
        children: raw.children.map(convert_nodes),
        permissions,
    })
}

fn parse_kind(kind: &str) -> Option<NodeKind> {
    match kind {
        "group" => Some(NodeKind::Group),
        "item" => Some(NodeKind::Item),
        "hidden" => Some(NodeKind::Hidden),
        "collapse" => Some(NodeKind::Collapse),
        _ => None,
    }
}
