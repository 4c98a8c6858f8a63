//! Scenario 3: Session lifecycle
//!
//! Walks one menu through a full session:
//!
//! Step A — before login, the store refuses to answer and the menu is empty
//! Step B — the logistics coordinator signs in and sees their sections
//! Step C — logout clears the store and the menu empties again
//! Step D — the backend is unreachable; the actor is treated as
//!          unauthenticated and nothing leaks into the menu

use bastion_contracts::{
    capability::{Action, CapabilityToken, Screen},
    error::{BastionError, BastionResult},
};
use bastion_core::CapabilityStore;
use bastion_menu::RoleBasedMenu;

use crate::{backoffice_menu, mock_data::MockBackend, render_tree};

pub fn run_scenario() -> BastionResult<()> {
    println!("=== Scenario 3: Session lifecycle ===");
    println!();

    let mut store = CapabilityStore::new();
    let mut menu = RoleBasedMenu::new(backoffice_menu()?);
    let shipment_view = CapabilityToken::new(Screen::Shipment, Action::View);

    // ── Step A: before login ──────────────────────────────────────────────────

    println!("  Step A: before login");
    match store.has_capability(&shipment_view) {
        Err(e @ BastionError::NotInitialized { .. }) => println!("    has_capability -> {}", e),
        other => {
            return Err(BastionError::ConfigError {
                reason: format!("expected NotInitialized before login, got {:?}", other),
            })
        }
    }
    println!("    menu entries: {}", menu.visible(&store).items.len());
    println!();

    // ── Step B: login ─────────────────────────────────────────────────────────

    println!("  Step B: login as logistics");
    let session = store.initialize_from(&MockBackend::new("logistics"))?;
    println!("    session {} for {}", session.id.0, session.username);
    println!("    {} -> {}", shipment_view, store.has_capability(&shipment_view)?);
    for line in render_tree(menu.visible(&store)).lines() {
        println!("    {}", line);
    }
    println!();

    // ── Step C: logout ────────────────────────────────────────────────────────

    println!("  Step C: logout");
    store.clear();
    println!("    initialized: {}", store.is_initialized());
    println!("    menu entries: {}", menu.visible(&store).items.len());
    println!();

    // ── Step D: backend unreachable ───────────────────────────────────────────

    println!("  Step D: login while the backend is unreachable");
    store.initialize_from(&MockBackend::offline())?;
    println!("    initialized: {}", store.is_initialized());
    println!("    granted: {}", store.granted()?.len());
    println!("    menu entries: {}", menu.visible(&store).items.len());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_runs() {
        run_scenario().unwrap();
    }
}
