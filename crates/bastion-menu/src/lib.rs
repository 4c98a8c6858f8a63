//! # bastion-menu
//!
//! Fail-closed, capability-driven navigation menu filtering for BASTION.
//!
//! ## Overview
//!
//! The static menu is declared in TOML ([`MenuDefinition`]) and converted into
//! a typed [`NavTree`](bastion_contracts::nav::NavTree). [`filter_tree`]
//! derives the subset an actor may see from their granted capabilities, and
//! [`RoleBasedMenu`] keeps that subset in step with the capability store.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use bastion_menu::{MenuDefinition, RoleBasedMenu};
//!
//! let definition = MenuDefinition::from_file(Path::new("menu.toml"))?;
//! let mut menu = RoleBasedMenu::from_definition(definition);
//! let visible = menu.visible(&store);
//! ```
//!
//! ## Visibility
//!
//! Nothing is visible until something is granted. Containers are visible when
//! any descendant is; leaves only when one of their own tokens is granted.

pub mod definition;
pub mod filter;
pub mod menu;

pub use definition::{MenuDefinition, RawNavNode};
pub use filter::{filter_tree, should_show, DASHBOARD_MARKER};
pub use menu::RoleBasedMenu;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use bastion_contracts::{
        capability::{Action, CapabilitySet, CapabilityToken, Screen},
        error::BastionError,
        nav::{NavNode, NavTree, NodeKind},
        profile::{ActorProfile, PermissionRecord},
    };
    use bastion_core::CapabilityStore;

    use crate::{filter_tree, MenuDefinition, RoleBasedMenu};

    const SALE_VIEW: CapabilityToken = CapabilityToken::new(Screen::SaleContract, Action::View);
    const PURCHASE_VIEW: CapabilityToken =
        CapabilityToken::new(Screen::PurchaseContract, Action::View);
    const COST_VIEW: CapabilityToken = CapabilityToken::new(Screen::CostSheet, Action::View);
    const SHIPMENT_VIEW: CapabilityToken = CapabilityToken::new(Screen::Shipment, Action::View);

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn granted(tokens: &[CapabilityToken]) -> CapabilitySet {
        tokens.iter().copied().collect()
    }

    fn item(id: &str, permissions: &[CapabilityToken]) -> NavNode {
        NavNode::item(id, id, permissions.to_vec()).with_url(format!("/{id}"))
    }

    fn ids(nodes: &[NavNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.id.as_deref().unwrap_or("<none>")).collect()
    }

    fn store_with(permissions: &[&str]) -> CapabilityStore {
        let mut store = CapabilityStore::new();
        store
            .initialize(ActorProfile {
                username: "test-actor".to_string(),
                roles: vec![],
                permissions: permissions.iter().map(|p| PermissionRecord::new(*p)).collect(),
            })
            .unwrap();
        store
    }

    fn contracts_tree() -> NavTree {
        NavTree::new(vec![
            NavNode::item("dashboard", "dashboard", vec![]).without_id().with_url("/"),
            NavNode::group(
                "contracts",
                "Contracts",
                vec![],
                vec![item("sale-contract", &[SALE_VIEW]), item("purchase-contract", &[PURCHASE_VIEW])],
            ),
            NavNode::group("cost", "Cost", vec![], vec![item("cost-sheet", &[COST_VIEW])])
                .with_kind(NodeKind::Collapse),
        ])
    }

    // ── 1. fail closed ────────────────────────────────────────────────────────

    /// With nothing granted, even always-visible landing entries are hidden.
    #[test]
    fn test_empty_grant_set_yields_empty_tree() {
        let filtered = filter_tree(&contracts_tree(), &CapabilitySet::default());
        assert!(filtered.is_empty());
    }

    // ── 2. container survival ─────────────────────────────────────────────────

    #[test]
    fn test_group_keeps_only_permitted_children() {
        let filtered = filter_tree(&contracts_tree(), &granted(&[PURCHASE_VIEW]));

        assert_eq!(ids(&filtered.items), vec!["<none>", "contracts"]);
        let contracts = &filtered.items[1];
        assert_eq!(ids(contracts.children.as_deref().unwrap()), vec!["purchase-contract"]);
    }

    #[test]
    fn test_children_keep_original_order() {
        let filtered = filter_tree(&contracts_tree(), &granted(&[PURCHASE_VIEW, SALE_VIEW]));
        let contracts = filtered.find("contracts").unwrap();
        assert_eq!(
            ids(contracts.children.as_deref().unwrap()),
            vec!["sale-contract", "purchase-contract"]
        );
    }

    #[test]
    fn test_group_with_no_surviving_children_is_dropped_even_if_permitted() {
        let tree = NavTree::new(vec![NavNode::group(
            "contracts",
            "Contracts",
            vec![SALE_VIEW],
            vec![item("purchase-contract", &[PURCHASE_VIEW])],
        )]);

        let filtered = filter_tree(&tree, &granted(&[SALE_VIEW]));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_childless_group_falls_back_to_own_permission() {
        let mut group = NavNode::group("reports", "Reports", vec![COST_VIEW], vec![]);
        group.children = None;
        let tree = NavTree::new(vec![group]);

        assert_eq!(ids(&filter_tree(&tree, &granted(&[COST_VIEW])).items), vec!["reports"]);
        assert!(filter_tree(&tree, &granted(&[SALE_VIEW])).is_empty());
    }

    #[test]
    fn test_nested_collapse_inside_group() {
        let tree = NavTree::new(vec![NavNode::group(
            "logistics",
            "Logistics",
            vec![],
            vec![NavNode::group("shipping", "Shipping", vec![], vec![item("shipment", &[SHIPMENT_VIEW])])
                .with_kind(NodeKind::Collapse)],
        )]);

        let filtered = filter_tree(&tree, &granted(&[SHIPMENT_VIEW]));
        assert!(filtered.find("shipment").is_some());
        assert!(filter_tree(&tree, &granted(&[SALE_VIEW])).is_empty());
    }

    // ── 3. leaf strictness ────────────────────────────────────────────────────

    #[test]
    fn test_leaf_with_empty_permissions_is_never_shown() {
        let tree = NavTree::new(vec![item("orphan", &[])]);
        let everything: CapabilitySet = CapabilityToken::catalog().collect();
        assert!(filter_tree(&tree, &everything).is_empty());
    }

    #[test]
    fn test_leaf_kinds_do_not_recurse() {
        // An item that happens to carry children is judged on its own tokens.
        let mut leaf = item("sale-contract", &[SALE_VIEW]);
        leaf.children = Some(vec![item("purchase-contract", &[PURCHASE_VIEW])]);
        let hidden = item("sale-detail", &[SALE_VIEW]).with_kind(NodeKind::Hidden);
        let tree = NavTree::new(vec![leaf.clone(), hidden]);

        let filtered = filter_tree(&tree, &granted(&[SALE_VIEW]));
        assert_eq!(filtered.items[0], leaf);
        assert_eq!(filtered.items[1].kind, NodeKind::Hidden);
        assert!(filter_tree(&tree, &granted(&[PURCHASE_VIEW])).is_empty());
    }

    // ── 4. dashboard default ──────────────────────────────────────────────────

    #[test]
    fn test_dashboard_marker_is_case_sensitive() {
        let tree = NavTree::new(vec![
            NavNode::item("x", "sales dashboard", vec![]).without_id(),
            NavNode::item("x", "Dashboard", vec![]).without_id(),
            NavNode::item("x", "Reports", vec![]).without_id(),
        ]);

        let filtered = filter_tree(&tree, &granted(&[SALE_VIEW]));
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].title, "sales dashboard");
    }

    // ── 5. duplicates and purity ──────────────────────────────────────────────

    #[test]
    fn test_duplicate_sibling_ids_pass_through() {
        let tree = NavTree::new(vec![item("sale-contract", &[SALE_VIEW]), item("sale-contract", &[SALE_VIEW])]);
        let filtered = filter_tree(&tree, &granted(&[SALE_VIEW]));
        assert_eq!(filtered.items.len(), 2);
    }

    #[test]
    fn test_filter_does_not_touch_input_and_is_idempotent() {
        let tree = contracts_tree();
        let before = tree.clone();
        let set = granted(&[SALE_VIEW, COST_VIEW]);

        let once = filter_tree(&tree, &set);
        let twice = filter_tree(&once, &set);

        assert_eq!(tree, before);
        assert_eq!(once, twice);
    }

    // ── 6. end to end ─────────────────────────────────────────────────────────

    /// `[item A(A_VIEW), group G([], [item B(B_VIEW)])]` with `{B_VIEW}` keeps
    /// only G, and G only because B survives.
    #[test]
    fn test_group_survives_solely_through_child() {
        let tree = NavTree::new(vec![
            NavNode::item("A", "A", vec![SALE_VIEW]),
            NavNode::group("G", "G", vec![], vec![NavNode::item("B", "B", vec![COST_VIEW])]),
        ]);

        let filtered = filter_tree(&tree, &granted(&[COST_VIEW]));

        let expected = NavTree::new(vec![NavNode::group(
            "G",
            "G",
            vec![],
            vec![NavNode::item("B", "B", vec![COST_VIEW])],
        )]);
        assert_eq!(filtered, expected);

        let json = serde_json::to_value(&filtered).unwrap();
        assert_eq!(json["items"][0]["type"], "group");
        assert_eq!(json["items"][0]["children"][0]["id"], "B");
    }

    // ── 7. menu definitions ───────────────────────────────────────────────────

    const MENU_TOML: &str = r#"
        [[items]]
        title = "dashboard"
        type = "item"
        url = "/"

        [[items]]
        id = "contracts"
        title = "Contracts"
        type = "group"

        [[items.children]]
        id = "sale-contract"
        title = "Sale contracts"
        type = "item"
        url = "/contracts/sale"
        permissions = ["SALE_CONTRACT_VIEW", "SALE_CONTRACT_CREATE"]

        [[items.children]]
        id = "broken-kind"
        title = "Broken"
        type = "menu"
        permissions = ["SALE_CONTRACT_VIEW"]

        [[items.children]]
        id = "broken-token"
        title = "Broken token"
        type = "item"
        permissions = ["SALE_CONTRACT_ARCHIVE"]

        [[items]]
        id = "cost"
        title = "Cost"
        type = "collapse"

        [[items.children]]
        id = "cost-sheet"
        title = "Cost sheets"
        type = "item"
        url = "/cost/sheet"
        permissions = ["COST_SHEET_VIEW"]
    "#;

    #[test]
    fn test_definition_drops_malformed_nodes_only() {
        let tree = MenuDefinition::from_toml_str(MENU_TOML).unwrap().into_tree();

        assert_eq!(ids(&tree.items), vec!["<none>", "contracts", "cost"]);
        let contracts = tree.find("contracts").unwrap();
        assert_eq!(contracts.kind, NodeKind::Group);
        assert_eq!(ids(contracts.children.as_deref().unwrap()), vec!["sale-contract"]);
        assert_eq!(tree.find("sale-contract").unwrap().permissions.len(), 2);
        assert_eq!(tree.find("cost").unwrap().kind, NodeKind::Collapse);
    }

    #[test]
    fn test_convert_node_reports_malformed() {
        let definition = MenuDefinition::from_toml_str(MENU_TOML).unwrap();
        let contracts = definition.items[1].clone();
        let broken = contracts.children.unwrap()[1].clone();

        match crate::definition::convert_node(broken) {
            Err(BastionError::MalformedNavigationNode { node, reason }) => {
                assert_eq!(node, "broken-kind");
                assert!(reason.contains("menu"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedNavigationNode, got {:?}", other),
        }
    }

    #[test]
    fn test_definition_parse_error() {
        match MenuDefinition::from_toml_str("[[items]\ntitle = ") {
            Err(BastionError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse menu TOML"), "unexpected: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 8. role-based menu ────────────────────────────────────────────────────

    #[test]
    fn test_role_based_menu_is_empty_before_initialize() {
        let store = CapabilityStore::new();
        let mut menu = RoleBasedMenu::new(contracts_tree());
        assert!(menu.visible(&store).is_empty());
        assert!(!menu.can_navigate(&store, "/"));
    }

    #[test]
    fn test_role_based_menu_follows_session_changes() {
        let mut store = store_with(&["SALE_CONTRACT_VIEW"]);
        let mut menu = RoleBasedMenu::new(contracts_tree());

        assert!(menu.visible(&store).find("sale-contract").is_some());
        assert!(menu.can_navigate(&store, "/sale-contract"));
        assert!(!menu.can_navigate(&store, "/cost-sheet"));

        store.clear();
        assert!(menu.visible(&store).is_empty());

        store
            .initialize(ActorProfile {
                username: "accountant".to_string(),
                roles: vec![],
                permissions: vec![PermissionRecord::new("COST_SHEET_VIEW")],
            })
            .unwrap();
        let visible = menu.visible(&store);
        assert!(visible.find("sale-contract").is_none());
        assert!(visible.find("cost-sheet").is_some());

        // The full tree is never modified.
        assert_eq!(menu.full(), &contracts_tree());
    }

    #[test]
    fn test_role_based_menu_keeps_separate_stores_apart() {
        let sales = store_with(&["SALE_CONTRACT_VIEW"]);
        let accountant = store_with(&["COST_SHEET_VIEW"]);
        assert_eq!(sales.generation(), accountant.generation());

        let mut menu = RoleBasedMenu::new(contracts_tree());

        let visible = menu.visible(&sales);
        assert!(visible.find("sale-contract").is_some());
        assert!(visible.find("cost-sheet").is_none());

        let visible = menu.visible(&accountant);
        assert!(visible.find("sale-contract").is_none());
        assert!(visible.find("cost-sheet").is_some());

        assert!(menu.can_navigate(&sales, "/sale-contract"));
        assert!(!menu.can_navigate(&accountant, "/sale-contract"));
    }

    #[test]
    fn test_can_navigate_ignores_routes_under_leaf_entries() {
        let mut sale = item("sale-contract", &[SALE_VIEW]);
        sale.children = Some(vec![item("cost-sheet", &[COST_VIEW])]);
        let mut hidden = item("sale-detail", &[SALE_VIEW]).with_kind(NodeKind::Hidden);
        hidden.children = Some(vec![item("shipment", &[SHIPMENT_VIEW])]);

        let store = store_with(&["SALE_CONTRACT_VIEW"]);
        let mut menu = RoleBasedMenu::new(NavTree::new(vec![sale, hidden]));

        assert!(menu.can_navigate(&store, "/sale-contract"));
        assert!(menu.can_navigate(&store, "/sale-detail"));
        assert!(!menu.can_navigate(&store, "/cost-sheet"));
        assert!(!menu.can_navigate(&store, "/shipment"));
    }
}
