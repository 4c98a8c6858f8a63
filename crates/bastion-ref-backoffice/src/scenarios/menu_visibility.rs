//! Scenario 1: Menu visibility
//!
//! Signs in as every bundled profile and prints the navigation menu each one
//! sees. The administrator sees everything, the guest sees nothing, and the
//! others see only the sections their capabilities reach.

use tracing::info;

use bastion_contracts::error::BastionResult;

use crate::{mock_data::PROFILE_NAMES, render_tree, sign_in};

pub fn run_scenario() -> BastionResult<()> {
    println!("=== Scenario 1: Menu visibility ===");
    println!();

    for name in PROFILE_NAMES {
        let (store, mut menu) = sign_in(name)?;
        let session = store.session()?;
        let roles: Vec<&str> = session.roles.iter().map(|r| r.code.as_str()).collect();

        println!("  Profile: {} ({})", name, session.username);
        println!("  Roles:   {}", if roles.is_empty() { "-".to_string() } else { roles.join(", ") });
        println!("  Granted: {} capabilities", session.granted.len());
        println!();

        let visible = menu.visible(&store);
        info!(profile = name, urls = visible.visible_urls().len(), "menu rendered");
        for line in render_tree(visible).lines() {
            println!("    {}", line);
        }
        println!();
    }

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
