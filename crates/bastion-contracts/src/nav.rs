//! Navigation tree types.
//!
//! The application's menu is a tree of [`NavNode`]s under a synthetic
//! [`NavTree`] root. The same types describe both the full static menu and
//! the filtered tree an actor is allowed to see.

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityToken;

/// How a navigation node is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A titled section that holds other nodes.
    Group,
    /// A routable leaf.
    Item,
    /// A routable leaf that is not shown in the menu but still gated.
    Hidden,
    /// An expandable section that holds other nodes.
    Collapse,
}

impl NodeKind {
    /// Return true for kinds whose visibility may come from their children.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Group | NodeKind::Collapse)
    }
}

/// One entry in the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    /// Stable identifier. A node without one is subject to the default
    /// visibility rule rather than a permission check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// `None` means the node has no children array at all, which is not the
    /// same as an empty one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavNode>>,

    /// Tokens gating this node. Holding any one of them is sufficient.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<CapabilityToken>,
}

impl NavNode {
    /// A leaf item with an identifier and the tokens that gate it.
    pub fn item(id: impl Into<String>, title: impl Into<String>, permissions: Vec<CapabilityToken>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            kind: NodeKind::Item,
            url: None,
            icon: None,
            children: None,
            permissions,
        }
    }

    /// A group with an identifier, its own gating tokens, and children.
    pub fn group(
        id: impl Into<String>,
        title: impl Into<String>,
        permissions: Vec<CapabilityToken>,
        children: Vec<NavNode>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            kind: NodeKind::Group,
            url: None,
            icon: None,
            children: Some(children),
            permissions,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Children that take part in menu visibility.
    ///
    /// Only group and collapse nodes contribute their children. Children of a
    /// leaf are carried along untouched by filtering and never checked, so
    /// they are not reachable routes.
    pub fn menu_children(&self) -> Option<&[NavNode]> {
        self.children.as_deref().filter(|_| self.kind.is_container())
    }
}

/// The synthetic root container of a navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavTree {
    pub items: Vec<NavNode>,
}

impl NavTree {
    pub fn new(items: Vec<NavNode>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the first node with `id`, depth-first in menu order.
    pub fn find(&self, id: &str) -> Option<&NavNode> {
        fn walk<'a>(nodes: &'a [NavNode], id: &str) -> Option<&'a NavNode> {
            for node in nodes {
                if node.id.as_deref() == Some(id) {
                    return Some(node);
                }
                if let Some(found) = node.children.as_deref().and_then(|c| walk(c, id)) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.items, id)
    }

    /// Every url in the tree, pre-order, descending only into containers.
    pub fn visible_urls(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [NavNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                if let Some(url) = node.url.as_deref() {
                    out.push(url);
                }
                if let Some(children) = node.menu_children() {
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }
}
