//! Scenario 2: Sale contract page
//!
//! The sale contract list is a routed page behind a `PageGuard`; its toolbar
//! buttons sit behind `FragmentGuard`s. For each bundled profile the scenario
//! prints either the page with the buttons that survive, or the access-denied
//! fallback. A counter confirms the page body is never built for an actor who
//! may not open it.

use std::cell::Cell;

use bastion_contracts::{
    capability::{Action, CapabilityToken, Screen},
    error::BastionResult,
};
use bastion_core::traits::{CapabilityCheck, Router};
use bastion_guard::{FragmentGuard, PageGuard, PageOutcome, Requirement};

use crate::{mock_data::PROFILE_NAMES, sign_in};

const fn sale(action: Action) -> CapabilityToken {
    CapabilityToken::new(Screen::SaleContract, action)
}

/// A router that only prints where it would go.
struct ConsoleRouter;

impl Router for ConsoleRouter {
    fn navigate_home(&mut self) {
        println!("      -> navigate to /dashboard");
    }

    fn navigate_back(&mut self) {
        println!("      -> navigate back");
    }
}

/// The toolbar labels an actor would see on the sale contract page.
pub fn toolbar(check: &dyn CapabilityCheck) -> Vec<&'static str> {
    let buttons = [
        (Requirement::one(sale(Action::Create)), "New contract"),
        (Requirement::one(sale(Action::Update)), "Edit"),
        (Requirement::one(sale(Action::Approve)), "Approve"),
        (Requirement::one(sale(Action::Delete)), "Delete"),
        (
            Requirement::any_of([CapabilityToken::new(Screen::CostSheet, Action::View)]).or([sale(Action::Approve)]),
            "Cost breakdown",
        ),
    ];

    buttons
        .into_iter()
        .filter_map(|(req, label)| FragmentGuard::new(req).render(check, || label))
        .collect()
}

pub fn run_scenario() -> BastionResult<()> {
    println!("=== Scenario 2: Sale contract page ===");
    println!();

    let guard = PageGuard::new(Requirement::one(sale(Action::View)).or([sale(Action::Approve)]));
    let page_builds = Cell::new(0u32);

    for name in PROFILE_NAMES {
        let (store, _) = sign_in(name)?;
        println!("  Profile: {}", name);

        let outcome = guard.render(&store, || {
            page_builds.set(page_builds.get() + 1);
            toolbar(&store)
        });

        match outcome {
            PageOutcome::Page(buttons) => {
                println!("    [PAGE]   Sale contracts");
                if buttons.is_empty() {
                    println!("    toolbar: (read-only)");
                } else {
                    println!("    toolbar: {}", buttons.join(" | "));
                }
            }
            PageOutcome::Denied(view) => {
                println!("    [DENIED] {}: {}", view.title, view.message);
                for action in view.actions {
                    println!("      option: {}", action.label());
                }
                view.perform(view.actions[0], &mut ConsoleRouter);
            }
        }
        println!();
    }

    println!("  Page body built {} time(s).", page_builds.get());
    println!();
    Ok(())
}
